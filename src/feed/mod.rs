//! Syndication feeds. The same ordered list of posts is written as RSS 2.0,
//! Atom 1.0 and JSON Feed 1.1.

use anyhow::Result;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use spdlog::debug;

use crate::config::{Author, Config};
use crate::content::PostRecord;

pub mod atom_renderer;
pub mod json_renderer;
pub mod rss_renderer;

pub const RSS_PATH: &str = "rss/feed.xml";
pub const ATOM_PATH: &str = "rss/atom.xml";
pub const JSON_PATH: &str = "rss/feed.json";

/// Feed level metadata. Nothing here comes from the posts.
pub struct FeedConfig {
    pub title: String,
    pub description: String,
    pub site_url: String,
    pub generator: String,
    pub author: Author,
}

impl FeedConfig {
    pub fn from_config(config: &Config) -> FeedConfig {
        let generator = match config.site.generator {
            Some(ref generator) => generator.clone(),
            None => format!("folio {}", env!("CARGO_PKG_VERSION")),
        };

        FeedConfig {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            site_url: trim_slash(&config.site.url).to_string(),
            generator,
            author: config.author.clone(),
        }
    }

    pub fn post_url(&self, post: &PostRecord) -> String {
        format!("{}/blog/{}", self.site_url, post.slug)
    }

    pub fn feed_url(&self, path: &str) -> String {
        format!("{}/{}", self.site_url, path)
    }

    pub fn image_url(&self) -> String {
        format!("{}/blog-img.png", self.site_url)
    }

    pub fn favicon_url(&self) -> String {
        format!("{}/favicon.ico", self.site_url)
    }

    pub fn copyright(&self, now: &DateTime<Utc>) -> String {
        format!("All rights reserved {}, {}", now.year(), self.author.name)
    }
}

fn trim_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// One post as every feed format sees it.
pub struct FeedItem<'a> {
    pub title: &'a str,
    pub url: String,
    pub description: &'a str,
    pub date: DateTime<Utc>,
    pub tags: &'a [String],
}

impl<'a> FeedItem<'a> {
    pub fn from_post(config: &FeedConfig, post: &'a PostRecord) -> FeedItem<'a> {
        FeedItem {
            title: post.title.as_str(),
            url: config.post_url(post),
            description: post.description.as_str(),
            date: Utc.from_utc_datetime(&post.date),
            tags: post.tags.as_slice(),
        }
    }
}

/// A feed document ready to be written out.
pub struct FeedChannel<'a> {
    pub config: &'a FeedConfig,
    pub updated: DateTime<Utc>,
    pub items: Vec<FeedItem<'a>>,
}

impl<'a> FeedChannel<'a> {
    pub fn new(config: &'a FeedConfig, posts: &[&'a PostRecord], updated: DateTime<Utc>) -> FeedChannel<'a> {
        let items = posts.iter()
            .map(|post| FeedItem::from_post(config, *post))
            .collect();

        FeedChannel {
            config,
            updated,
            items,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Feeds {
    pub rss: String,
    pub atom: String,
    pub json: String,
}

/// Writes the posts, in the given order, in the three feed formats.
pub fn emit_feeds(config: &FeedConfig, posts: &[&PostRecord], now: DateTime<Utc>) -> Result<Feeds> {
    let channel = FeedChannel::new(config, posts, now);

    let rss = String::from_utf8(rss_renderer::render(&channel)?)?;
    let atom = String::from_utf8(atom_renderer::render(&channel)?)?;
    let json = json_renderer::render(&channel)?;

    debug!("Feeds with {} items: rss={}B atom={}B json={}B",
        channel.items.len(), rss.len(), atom.len(), json.len());

    Ok(Feeds {
        rss,
        atom,
        json,
    })
}


#[cfg(test)]
mod tests {
    use crate::ordering::{order, SortOrder};

    use super::test_support::{create_post, feed_config, now};
    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_urls() {
        let mut config = feed_config();
        config.site_url = trim_slash("https://oliviac.dev/").to_string();
        let post = create_post("1", "2024-01-02");
        assert_eq!(config.post_url(&post), "https://oliviac.dev/blog/post-1");
        assert_eq!(config.feed_url(RSS_PATH), "https://oliviac.dev/rss/feed.xml");
        assert_eq!(config.copyright(&now()), "All rights reserved 2024, Olivia");
    }

    #[test]
    fn test_same_items_same_order() {
        let posts = vec![
            create_post("1", "2021-01-01"),
            create_post("2", "2022-01-01"),
            create_post("3", "2020-01-01"),
        ];
        let ordered = order(&posts, SortOrder::Descending);
        let feeds = emit_feeds(&feed_config(), &ordered, now()).unwrap();

        assert_eq!(count(&feeds.rss, "<item>"), 3);
        assert_eq!(count(&feeds.atom, "<entry>"), 3);

        let json: serde_json::Value = serde_json::from_str(&feeds.json).unwrap();
        let items = json["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);

        let expected = ["post-2", "post-1", "post-3"];
        let json_ids: Vec<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
        for (i, slug) in expected.iter().enumerate() {
            let url = format!("https://oliviac.dev/blog/{}", slug);
            assert_eq!(json_ids[i], url);
        }

        let positions = |doc: &str| -> Vec<usize> {
            expected.iter()
                .map(|slug| doc.find(&format!("<link>https://oliviac.dev/blog/{}</link>", slug))
                    .or_else(|| doc.find(&format!("<id>https://oliviac.dev/blog/{}</id>", slug)))
                    .unwrap())
                .collect()
        };
        let rss_pos = positions(&feeds.rss);
        let atom_pos = positions(&feeds.atom);
        assert!(rss_pos.windows(2).all(|w| w[0] < w[1]));
        assert!(atom_pos.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_catalog() {
        let feeds = emit_feeds(&feed_config(), &[], now()).unwrap();
        assert_eq!(count(&feeds.rss, "<item>"), 0);
        assert_eq!(count(&feeds.atom, "<entry>"), 0);
        let json: serde_json::Value = serde_json::from_str(&feeds.json).unwrap();
        assert_eq!(json["items"].as_array().unwrap().len(), 0);
    }
}
