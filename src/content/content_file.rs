use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::content::Slug;
use crate::content::content_format::ContentFormat;

pub struct ContentFile {
    pub slug: Slug,
    pub file_path: PathBuf,
    pub format: ContentFormat,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: PathBuf, posts_dir: &Path, index_base_name: &str) -> io::Result<ContentFile> {
        let format = match ContentFormat::from_path(&file_path) {
            None => return Err(io::Error::new(ErrorKind::Unsupported, format!("Could not guess the type of the file {}", file_path.display()))),
            Some(format) => format,
        };

        let slug = Self::slug_from_path(&file_path, posts_dir, index_base_name)?;
        let raw_content = fs::read_to_string(&file_path)?;

        Ok(ContentFile {
            slug,
            file_path,
            format,
            raw_content,
        })
    }

    /// `posts/tmux.md` is `tmux`, `posts/tmux/index.md` is also `tmux`.
    /// An index file directly in `posts_dir` keeps its own stem.
    pub fn slug_from_path(path: &Path, posts_dir: &Path, index_base_name: &str) -> io::Result<Slug> {
        let stem = path.file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| io::Error::new(ErrorKind::InvalidInput, format!("Invalid post path {}", path.display())))?;

        if stem != index_base_name || path.parent() == Some(posts_dir) {
            return Ok(Slug(stem.to_string()));
        }

        path.parent()
            .and_then(|p| p.file_name())
            .and_then(|d| d.to_str())
            .map(|d| Slug(d.to_string()))
            .ok_or_else(|| io::Error::new(ErrorKind::InvalidInput, format!("Could not find post link for {}", path.display())))
    }
}
