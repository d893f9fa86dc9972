use chrono::SecondsFormat;
use serde::Serialize;

use crate::config::Author;
use crate::feed::{FeedChannel, JSON_PATH};

const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

#[derive(Serialize)]
struct JsonAuthor<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

impl<'a> From<&'a Author> for JsonAuthor<'a> {
    fn from(author: &'a Author) -> Self {
        JsonAuthor {
            name: author.name.as_str(),
            url: author.link.as_deref(),
        }
    }
}

fn no_tags(tags: &&[String]) -> bool {
    tags.is_empty()
}

#[derive(Serialize)]
struct JsonItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    summary: &'a str,
    content_html: &'a str,
    date_published: String,
    date_modified: String,
    authors: Vec<JsonAuthor<'a>>,
    #[serde(skip_serializing_if = "no_tags")]
    tags: &'a [String],
}

#[derive(Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: String,
    description: &'a str,
    icon: String,
    favicon: String,
    authors: Vec<JsonAuthor<'a>>,
    items: Vec<JsonItem<'a>>,
}

pub fn render(channel: &FeedChannel) -> serde_json::Result<String> {
    let config = channel.config;

    let items = channel.items.iter()
        .map(|item| {
            let date = item.date.to_rfc3339_opts(SecondsFormat::Secs, true);
            JsonItem {
                id: &item.url,
                url: &item.url,
                title: item.title,
                summary: item.description,
                content_html: "",
                date_published: date.clone(),
                date_modified: date,
                authors: vec![JsonAuthor::from(&config.author)],
                tags: item.tags,
            }
        })
        .collect();

    let feed = JsonFeed {
        version: JSON_FEED_VERSION,
        title: &config.title,
        home_page_url: &config.site_url,
        feed_url: config.feed_url(JSON_PATH),
        description: &config.description,
        icon: config.image_url(),
        favicon: config.favicon_url(),
        authors: vec![JsonAuthor::from(&config.author)],
        items,
    };

    serde_json::to_string_pretty(&feed)
}
