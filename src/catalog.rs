use std::io;
use std::path::{Path, PathBuf};

use spdlog::{debug, info};

use crate::content::content_file::ContentFile;
use crate::content::PostRecord;
use crate::ordering::{select, Limit, SortOrder};
use crate::post_list::PostList;

/// Every post of the blog, in discovery order. Built once, never mutated.
#[derive(Debug, Default)]
pub struct Catalog {
    posts: Vec<PostRecord>,
}

impl Catalog {
    /// Loads every post under `posts_dir`. The first file that fails to
    /// parse fails the whole load.
    pub fn load(posts_dir: &Path, index_base_name: &str) -> io::Result<Catalog> {
        let post_list = PostList {
            root_dir: PathBuf::from(posts_dir),
            index_base_name: index_base_name.to_string(),
        };

        let mut posts = vec![];
        for file_path in post_list.retrieve_all()? {
            let content_file = ContentFile::from_file(file_path, posts_dir, index_base_name)?;
            let post = PostRecord::from_content_file(&content_file)?;
            debug!("Loaded post {} ({:?}) from {}", post.slug, content_file.format, content_file.file_path.display());
            posts.push(post);
        }

        info!("Loaded {} posts from {}", posts.len(), posts_dir.display());
        Ok(Catalog { posts })
    }

    pub fn from_posts(posts: Vec<PostRecord>) -> Catalog {
        Catalog { posts }
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn find(&self, slug: &str) -> Option<&PostRecord> {
        self.posts.iter().find(|p| p.slug.0 == slug)
    }

    pub fn select(&self, direction: SortOrder, n: Limit) -> Vec<&PostRecord> {
        select(&self.posts, direction, n)
    }

    /// Newest first, everything.
    pub fn newest_first(&self) -> Vec<&PostRecord> {
        self.select(SortOrder::Descending, Limit::Unbounded)
    }
}
