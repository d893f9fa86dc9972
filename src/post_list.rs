use std::{fs, io};
use std::path::{Path, PathBuf};

use crate::content::content_format::ContentFormat;

/// Finds the content files of a posts directory. A post is either a
/// `.md`/`.mdx` file directly inside `root_dir`, or a sub-directory holding
/// `{index_base_name}.md` (or `.mdx`).
pub struct PostList {
    pub root_dir: PathBuf,
    pub index_base_name: String,
}

impl PostList {
    /// Files and directory posts together, sorted by path.
    pub fn retrieve_all(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = self.retrieve_files()?;
        posts.extend(self.retrieve_dirs()?);
        posts.sort();
        Ok(posts)
    }

    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        for entry in fs::read_dir(self.root_dir.as_path())? {
            // Follows symlinks
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if ContentFormat::from_path(&path).is_some() {
                posts.push(path);
            }
        }
        Ok(posts)
    }

    pub fn retrieve_dirs(&self) -> io::Result<Vec<PathBuf>> {
        let dirs = Self::list_dirs(self.root_dir.as_path())?;
        let mut post_files = vec![];
        for dir in dirs {
            if let Some(index_file) = self.find_index_file(&dir) {
                post_files.push(index_file);
            }
        }
        Ok(post_files)
    }

    fn list_dirs(posts_dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = vec![];
        for entry in fs::read_dir(posts_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        Ok(dirs)
    }

    fn find_index_file(&self, dir: &Path) -> Option<PathBuf> {
        ContentFormat::EXTENSIONS.iter()
            .map(|ext| dir.join(format!("{}.{}", self.index_base_name, ext)))
            .find(|path| path.is_file())
    }
}
