use std::fmt;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::content::content_file::ContentFile;
use crate::content::front_matter::{parse_front_matter, split_front_matter};
use crate::text_utils::parse_date_time;

pub mod content_file;
pub mod content_format;
pub mod front_matter;

#[derive(Debug, Clone, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Slug(pub String);

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// One blog entry. The body is kept as raw markdown/MDX.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub slug: Slug,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub image: Option<String>,
    pub date: NaiveDateTime,
    pub body: String,
    #[serde(skip)]
    pub file_name: PathBuf,
}

impl fmt::Display for PostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, tags={:?}\ntitle={}\ndescription={}",
               self.slug,
               self.date,
               self.tags,
               self.title,
               self.description,
        )
    }
}

impl PostRecord {
    pub fn from_content_file(content_file: &ContentFile) -> io::Result<PostRecord> {
        Self::from_string(&content_file.file_path, content_file.slug.clone(), &content_file.raw_content)
    }

    /// Example of post
    /// ---
    /// title: Getting started with tmux
    /// date: 2022-01-15
    /// tags: [terminal, tmux]
    /// ---
    ///
    /// Body in markdown
    pub fn from_string(file_name: &Path, slug: Slug, content: &str) -> io::Result<PostRecord> {
        let with_file = |e: io::Error| io::Error::new(e.kind(), format!("{} - file={}", e, file_name.display()));

        let (block, body) = split_front_matter(content).map_err(with_file)?;
        let front_matter = parse_front_matter(&block).map_err(with_file)?;

        let Some(title) = front_matter.title else {
            return Err(with_file(io::Error::new(ErrorKind::InvalidData, "Missing `title` in front-matter")));
        };

        let Some(date) = front_matter.date else {
            return Err(with_file(io::Error::new(ErrorKind::InvalidData, "Missing `date` in front-matter")));
        };

        let date = parse_date_time(&date)
            .map_err(|e| with_file(io::Error::new(ErrorKind::InvalidData, e)))?;

        Ok(PostRecord {
            slug,
            title,
            description: front_matter.description.unwrap_or_default(),
            tags: front_matter.tags,
            keywords: front_matter.keywords,
            image: front_matter.image,
            date,
            body: body.to_string(),
            file_name: file_name.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use crate::test_data::{POST_DATA, POST_DATA_MDX};

    use super::*;

    fn slug(s: &str) -> Slug {
        Slug(s.to_string())
    }

    #[test]
    fn test_from_string() {
        let file_name = PathBuf::from("posts/x-file.md");
        let post = PostRecord::from_string(&file_name, slug("x-file"), "---\ndate: 2022-06-01\ntitle: \"X\"\n---\nHello\n").unwrap();
        assert_eq!(post.slug, slug("x-file"));
        assert_eq!(post.title, "X");
        assert_eq!(post.date, NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        ));
        assert_eq!(post.description, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.body, "Hello\n");
    }

    #[test]
    fn test_full_post() {
        let file_name = PathBuf::from("posts/vim-with-vscode.md");
        let post = PostRecord::from_string(&file_name, slug("vim-with-vscode"), POST_DATA).unwrap();
        println!("{}", post);
        assert_eq!(post.title, "Using Vim with VS Code");
        assert_eq!(post.tags, ["vim", "vscode"]);
        assert_eq!(post.keywords, ["vim", "editor"]);
        assert_eq!(post.image.as_deref(), Some("vim.png"));
        assert!(post.body.trim_start().starts_with("I have been using Vim keybindings"));
    }

    #[test]
    fn test_mdx_meta_post() {
        let file_name = PathBuf::from("posts/getting-started-with-tmux.mdx");
        let post = PostRecord::from_string(&file_name, slug("getting-started-with-tmux"), POST_DATA_MDX).unwrap();
        assert_eq!(post.title, "Getting started with tmux");
        assert_eq!(post.description, "Sessions, windows and panes");
        assert!(post.body.contains("<Callout>"));
    }

    #[test]
    fn test_missing_title() {
        let file_name = PathBuf::from("posts/broken.md");
        let err = PostRecord::from_string(&file_name, slug("broken"), "---\ndate: 2022-06-01\n---\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("title"));
        assert!(err.to_string().contains("posts/broken.md"));
    }

    #[test]
    fn test_missing_date() {
        let file_name = PathBuf::from("posts/broken.md");
        let err = PostRecord::from_string(&file_name, slug("broken"), "---\ntitle: X\n---\n").unwrap_err();
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_invalid_date() {
        let file_name = PathBuf::from("posts/broken.md");
        let err = PostRecord::from_string(&file_name, slug("broken"), "---\ntitle: X\ndate: someday\n---\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("someday"));
    }

    #[test]
    fn test_missing_front_matter() {
        let file_name = PathBuf::from("posts/broken.md");
        let err = PostRecord::from_string(&file_name, slug("broken"), "# Title only\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
