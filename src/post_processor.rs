use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::content::PostRecord;
use crate::ordering::{limit, order, Limit, SortOrder};

/// A blog index listing: the selected posts plus every tag of the catalog,
/// most used first.
pub struct PostListWithTags<'a> {
    pub posts: Vec<&'a PostRecord>,
    pub tags: Vec<String>,
}

pub fn retrieve_post_list<'a>(catalog: &'a Catalog, tag_to_filter: Option<&str>,
                              direction: SortOrder, n: Limit) -> PostListWithTags<'a> {
    let mut tag_map: HashMap<&str, u32> = HashMap::new();
    for post in catalog.posts() {
        for post_tag in post.tags.iter() {
            *tag_map.entry(post_tag.as_str()).or_insert(0) += 1;
        }
    }

    let filtered = catalog.posts().iter().filter(|post| match tag_to_filter {
        None => true,
        Some(tag) => post.tags.iter().any(|t| t == tag),
    });
    let posts = limit(order(filtered, direction), n);

    // Sort tags by frequency reversed, then by name
    let mut tag_list: Vec<(&str, u32)> = tag_map.into_iter().collect();
    tag_list.sort_by(|(ta, ca), (tb, cb)| cb.cmp(ca).then_with(|| ta.cmp(tb)));
    let tags = tag_list.into_iter().map(|(t, _)| t.to_string()).collect();

    PostListWithTags {
        posts,
        tags,
    }
}
