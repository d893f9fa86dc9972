use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::feed::{FeedChannel, RSS_PATH};

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
  <title>Olivia's dev blog</title>
  <link>https://oliviac.dev</link>
  <description>Olivia Coumans' site</description>
  <lastBuildDate>Mon, 6 May 2024 07:08:09 +0000</lastBuildDate>
  <docs>https://validator.w3.org/feed/docs/rss2.html</docs>
  <generator>Feed for Olivia's dev blog</generator>
  <image>...</image>
  <copyright>All rights reserved 2024, Olivia Coumans</copyright>
  <atom:link href="https://oliviac.dev/rss/feed.xml" rel="self" type="application/rss+xml"/>
  <item>
    <title>Getting started with tmux</title>
    <link>https://oliviac.dev/blog/getting-started-with-tmux</link>
    <guid>https://oliviac.dev/blog/getting-started-with-tmux</guid>
    <pubDate>Sat, 15 Jan 2022 00:00:00 +0000</pubDate>
    <description><![CDATA[Sessions, windows and panes]]></description>
    <author>olivialngc1@gmail.com (Olivia Coumans)</author>
    <category>tmux</category>
  </item>
</channel>
</rss>
*/

const RSS_DOCS: &str = "https://validator.w3.org/feed/docs/rss2.html";

pub fn render(channel: &FeedChannel) -> quick_xml::Result<Vec<u8>> {
    let config = channel.config;
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", "http://www.w3.org/2005/Atom"));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    push_text(&mut writer, "title", &config.title)?;
    push_text(&mut writer, "link", &config.site_url)?;
    push_text(&mut writer, "description", &config.description)?;
    push_text(&mut writer, "lastBuildDate", &channel.updated.to_rfc2822())?;
    push_text(&mut writer, "docs", RSS_DOCS)?;
    push_text(&mut writer, "generator", &config.generator)?;

    writer.write_event(Event::Start(BytesStart::new("image")))?;
    push_text(&mut writer, "title", &config.title)?;
    push_text(&mut writer, "url", &config.image_url())?;
    push_text(&mut writer, "link", &config.site_url)?;
    writer.write_event(Event::End(BytesEnd::new("image")))?;

    push_text(&mut writer, "copyright", &config.copyright(&channel.updated))?;

    let self_url = config.feed_url(RSS_PATH);
    let mut self_link = BytesStart::new("atom:link");
    self_link.push_attribute(("href", self_url.as_str()));
    self_link.push_attribute(("rel", "self"));
    self_link.push_attribute(("type", "application/rss+xml"));
    writer.write_event(Event::Empty(self_link))?;

    let author = match config.author.email {
        Some(ref email) => Some(format!("{} ({})", email, config.author.name)),
        None => None,
    };

    for item in channel.items.iter() {
        writer.write_event(Event::Start(BytesStart::new("item")))?;

        push_text(&mut writer, "title", item.title)?;
        push_text(&mut writer, "link", &item.url)?;
        push_text(&mut writer, "guid", &item.url)?;
        push_text(&mut writer, "pubDate", &item.date.to_rfc2822())?;
        push_cdata(&mut writer, "description", item.description)?;

        // RSS only allows an e-mail address as author
        if let Some(ref author) = author {
            push_text(&mut writer, "author", author)?;
        }

        for tag in item.tags {
            push_text(&mut writer, "category", tag)?;
        }

        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(writer.into_inner().into_inner())
}

pub(crate) fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use crate::feed::test_support::{create_post, feed_config, now};
    use crate::feed::FeedChannel;

    use super::*;

    #[test]
    fn render_xml() {
        let config = feed_config();
        let posts = vec![create_post("1", "2024-01-02 05:06:07"), create_post("2", "2024-01-01 05:06:07")];
        let refs: Vec<_> = posts.iter().collect();
        let channel = FeedChannel::new(&config, &refs, now());

        let xml = render(&channel).unwrap();
        println!("XML: {}", str::from_utf8(&xml).unwrap());
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn render_escapes_text() {
        let config = feed_config();
        let mut post = create_post("1", "2024-01-02");
        post.title = "Generics <T> & constraints".to_string();
        post.description = "ends with ]]> marker".to_string();
        let channel = FeedChannel::new(&config, &[&post], now());

        let xml = String::from_utf8(render(&channel).unwrap()).unwrap();
        assert!(xml.contains("<title>Generics &lt;T&gt; &amp; constraints</title>"));
        assert!(xml.contains("<![CDATA[ends with ]] > marker]]>"));
    }

    #[test]
    fn render_without_email() {
        let mut config = feed_config();
        config.author.email = None;
        let post = create_post("1", "2024-01-02");
        let channel = FeedChannel::new(&config, &[&post], now());

        let xml = String::from_utf8(render(&channel).unwrap()).unwrap();
        assert!(!xml.contains("<author>"));
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom"><channel><title>my feed</title><link>https://oliviac.dev</link><description>My blog feed</description><lastBuildDate>Mon, 6 May 2024 07:08:09 +0000</lastBuildDate><docs>https://validator.w3.org/feed/docs/rss2.html</docs><generator>Feed for my blog</generator><image><title>my feed</title><url>https://oliviac.dev/blog-img.png</url><link>https://oliviac.dev</link></image><copyright>All rights reserved 2024, Olivia</copyright><atom:link href="https://oliviac.dev/rss/feed.xml" rel="self" type="application/rss+xml"/><item><title>title-of-post-1</title><link>https://oliviac.dev/blog/post-1</link><guid>https://oliviac.dev/blog/post-1</guid><pubDate>Tue, 2 Jan 2024 05:06:07 +0000</pubDate><description><![CDATA[summary-of-post-1]]></description><author>olivia@example.com (Olivia)</author><category>tag-1</category></item><item><title>title-of-post-2</title><link>https://oliviac.dev/blog/post-2</link><guid>https://oliviac.dev/blog/post-2</guid><pubDate>Mon, 1 Jan 2024 05:06:07 +0000</pubDate><description><![CDATA[summary-of-post-2]]></description><author>olivia@example.com (Olivia)</author><category>tag-2</category></item></channel></rss>"##;
}
