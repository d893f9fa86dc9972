use std::io::Cursor;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::Author;
use crate::feed::rss_renderer::push_text;
use crate::feed::{FeedChannel, ATOM_PATH};

fn atom_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn push_link(writer: &mut Writer<Cursor<Vec<u8>>>, rel: &str, href: &str) -> quick_xml::Result<()> {
    let mut link = BytesStart::new("link");
    link.push_attribute(("rel", rel));
    link.push_attribute(("href", href));
    writer.write_event(Event::Empty(link))?;
    Ok(())
}

fn push_person(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, author: &Author) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    push_text(writer, "name", &author.name)?;
    if let Some(ref email) = author.email {
        push_text(writer, "email", email)?;
    }
    if let Some(ref link) = author.link {
        push_text(writer, "uri", link)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

pub fn render(channel: &FeedChannel) -> quick_xml::Result<Vec<u8>> {
    let config = channel.config;
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut feed = BytesStart::new("feed");
    feed.push_attribute(("xmlns", "http://www.w3.org/2005/Atom"));
    writer.write_event(Event::Start(feed))?;

    push_text(&mut writer, "id", &config.site_url)?;
    push_text(&mut writer, "title", &config.title)?;
    push_text(&mut writer, "updated", &atom_date(&channel.updated))?;
    push_text(&mut writer, "generator", &config.generator)?;
    push_person(&mut writer, "author", &config.author)?;
    push_link(&mut writer, "alternate", &config.site_url)?;
    push_link(&mut writer, "self", &config.feed_url(ATOM_PATH))?;
    push_text(&mut writer, "subtitle", &config.description)?;
    push_text(&mut writer, "logo", &config.image_url())?;
    push_text(&mut writer, "icon", &config.favicon_url())?;
    push_text(&mut writer, "rights", &config.copyright(&channel.updated))?;

    for item in channel.items.iter() {
        let date = atom_date(&item.date);

        writer.write_event(Event::Start(BytesStart::new("entry")))?;

        let mut title = BytesStart::new("title");
        title.push_attribute(("type", "html"));
        writer.write_event(Event::Start(title))?;
        writer.write_event(Event::Text(BytesText::new(item.title)))?;
        writer.write_event(Event::End(BytesEnd::new("title")))?;

        push_text(&mut writer, "id", &item.url)?;
        push_link(&mut writer, "alternate", &item.url)?;
        push_text(&mut writer, "updated", &date)?;

        let mut summary = BytesStart::new("summary");
        summary.push_attribute(("type", "html"));
        writer.write_event(Event::Start(summary))?;
        writer.write_event(Event::Text(BytesText::new(item.description)))?;
        writer.write_event(Event::End(BytesEnd::new("summary")))?;

        push_person(&mut writer, "author", &config.author)?;
        push_person(&mut writer, "contributor", &config.author)?;

        for tag in item.tags {
            let mut category = BytesStart::new("category");
            category.push_attribute(("term", tag.as_str()));
            writer.write_event(Event::Empty(category))?;
        }

        push_text(&mut writer, "published", &date)?;

        writer.write_event(Event::End(BytesEnd::new("entry")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("feed")))?;

    Ok(writer.into_inner().into_inner())
}

#[cfg(test)]
mod tests {
    use std::str;

    use crate::feed::test_support::{create_post, feed_config, now};

    use super::*;

    #[test]
    fn render_atom() {
        let config = feed_config();
        let post = create_post("1", "2024-01-02 05:06:07");
        let channel = FeedChannel::new(&config, &[&post], now());

        let xml = render(&channel).unwrap();
        println!("XML: {}", str::from_utf8(&xml).unwrap());
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn render_author_without_optional_fields() {
        let mut config = feed_config();
        config.author.email = None;
        config.author.link = None;
        let channel = FeedChannel::new(&config, &[], now());

        let xml = String::from_utf8(render(&channel).unwrap()).unwrap();
        assert!(xml.contains("<author><name>Olivia</name></author>"));
        assert!(!xml.contains("<entry>"));
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="utf-8"?><feed xmlns="http://www.w3.org/2005/Atom"><id>https://oliviac.dev</id><title>my feed</title><updated>2024-05-06T07:08:09Z</updated><generator>Feed for my blog</generator><author><name>Olivia</name><email>olivia@example.com</email><uri>https://twitter.com/liv_codes</uri></author><link rel="alternate" href="https://oliviac.dev"/><link rel="self" href="https://oliviac.dev/rss/atom.xml"/><subtitle>My blog feed</subtitle><logo>https://oliviac.dev/blog-img.png</logo><icon>https://oliviac.dev/favicon.ico</icon><rights>All rights reserved 2024, Olivia</rights><entry><title type="html">title-of-post-1</title><id>https://oliviac.dev/blog/post-1</id><link rel="alternate" href="https://oliviac.dev/blog/post-1"/><updated>2024-01-02T05:06:07Z</updated><summary type="html">summary-of-post-1</summary><author><name>Olivia</name><email>olivia@example.com</email><uri>https://twitter.com/liv_codes</uri></author><contributor><name>Olivia</name><email>olivia@example.com</email><uri>https://twitter.com/liv_codes</uri></contributor><category term="tag-1"/><published>2024-01-02T05:06:07Z</published></entry></feed>"##;
}
