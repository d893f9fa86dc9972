//! Front-matter extraction. A YAML block fenced by `---` or a TOML block
//! fenced by `+++` must open the file; the body is whatever follows the
//! closing fence line.

use std::io;
use std::io::ErrorKind;

use serde::Deserialize;

const YAML_FENCE: &str = "---";
const TOML_FENCE: &str = "+++";

#[derive(Debug, PartialEq)]
pub enum FrontMatterBlock<'a> {
    Yaml(&'a str),
    Toml(&'a str),
}

/// Tags may be written as a list or as a single comma separated string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
enum TagList {
    One(String),
    Many(Vec<String>),
}

impl Default for TagList {
    fn default() -> Self {
        TagList::Many(vec![])
    }
}

impl TagList {
    fn into_vec(self) -> Vec<String> {
        let tags = match self {
            TagList::One(s) => s.split(',').map(|t| t.to_string()).collect(),
            TagList::Many(v) => v,
        };
        tags.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Metadata nested under `meta:`, as MDX route modules lay it out.
#[derive(Deserialize, Debug, Default)]
struct MetaBlock {
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    keywords: Option<TagList>,
    #[serde(default)]
    tags: Option<TagList>,
    image: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct RawFrontMatter {
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
    #[serde(default)]
    tags: Option<TagList>,
    #[serde(default)]
    keywords: Option<TagList>,
    image: Option<String>,
    #[serde(default)]
    meta: Option<MetaBlock>,
}

/// Front-matter with the `meta:` block merged in. Top level keys win.
#[derive(Debug, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub image: Option<String>,
}

impl From<RawFrontMatter> for FrontMatter {
    fn from(raw: RawFrontMatter) -> Self {
        let meta = raw.meta.unwrap_or_default();
        FrontMatter {
            title: raw.title.or(meta.title),
            date: raw.date,
            description: raw.description.or(meta.description),
            tags: raw.tags.or(meta.tags).unwrap_or_default().into_vec(),
            keywords: raw.keywords.or(meta.keywords).unwrap_or_default().into_vec(),
            image: raw.image.or(meta.image),
        }
    }
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, msg)
}

pub fn split_front_matter(source: &str) -> io::Result<(FrontMatterBlock<'_>, &str)> {
    let trimmed = source.trim_start_matches('\u{feff}').trim_start();

    let fence = if trimmed.starts_with(YAML_FENCE) {
        YAML_FENCE
    } else if trimmed.starts_with(TOML_FENCE) {
        TOML_FENCE
    } else {
        return Err(invalid_data("Missing front-matter, content must begin with `---`".to_string()));
    };

    let after_open = &trimmed[fence.len()..];
    let close_marker = format!("\n{}", fence);
    let Some(close_pos) = after_open.find(&close_marker) else {
        return Err(invalid_data(format!("Unclosed front-matter, missing closing `{}`", fence)));
    };

    let block = &after_open[..close_pos];
    let rest = &after_open[close_pos + close_marker.len()..];
    let body = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => "",
    };

    let block = if fence == YAML_FENCE {
        FrontMatterBlock::Yaml(block)
    } else {
        FrontMatterBlock::Toml(block)
    };

    Ok((block, body))
}

pub fn parse_front_matter(block: &FrontMatterBlock) -> io::Result<FrontMatter> {
    let raw: RawFrontMatter = match block {
        FrontMatterBlock::Yaml(yaml) if yaml.trim().is_empty() => RawFrontMatter::default(),
        FrontMatterBlock::Yaml(yaml) => serde_yaml::from_str(yaml)
            .map_err(|e| invalid_data(format!("Invalid YAML in front-matter: {}", e)))?,
        FrontMatterBlock::Toml(toml_src) => parse_toml(toml_src)?,
    };

    Ok(raw.into())
}

// TOML dates are native datetimes, not strings.
fn parse_toml(toml_src: &str) -> io::Result<RawFrontMatter> {
    let mut table: toml::Table = toml_src.parse()
        .map_err(|e| invalid_data(format!("Invalid TOML in front-matter: {}", e)))?;

    if let Some(toml::Value::Datetime(dt)) = table.get("date") {
        let date = dt.to_string();
        table.insert("date".to_string(), toml::Value::String(date));
    }

    toml::Value::Table(table)
        .try_into::<RawFrontMatter>()
        .map_err(|e| invalid_data(format!("Invalid TOML in front-matter: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml() {
        let source = "---\ntitle: X\ndate: 2022-06-01\n---\n\n# Body\n";
        let (block, body) = split_front_matter(source).unwrap();
        assert_eq!(block, FrontMatterBlock::Yaml("\ntitle: X\ndate: 2022-06-01"));
        assert_eq!(body, "\n# Body\n");
    }

    #[test]
    fn test_split_toml() {
        let source = "+++\ntitle = \"X\"\n+++\nBody";
        let (block, body) = split_front_matter(source).unwrap();
        assert_eq!(block, FrontMatterBlock::Toml("\ntitle = \"X\""));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_missing_and_unclosed() {
        let err = split_front_matter("# Just markdown").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = split_front_matter("---\ntitle: X\n").unwrap_err();
        assert!(err.to_string().contains("Unclosed"));
    }

    #[test]
    fn test_parse_yaml() {
        let block = FrontMatterBlock::Yaml(r#"
title: "An overview of unknown in TypeScript"
date: 2021-11-02
description: A short tour
tags: [typescript, types]
keywords: typescript, unknown
image: unknown.png
"#);
        let fm = parse_front_matter(&block).unwrap();
        assert_eq!(fm.title.as_deref(), Some("An overview of unknown in TypeScript"));
        assert_eq!(fm.date.as_deref(), Some("2021-11-02"));
        assert_eq!(fm.description.as_deref(), Some("A short tour"));
        assert_eq!(fm.tags, ["typescript", "types"]);
        assert_eq!(fm.keywords, ["typescript", "unknown"]);
        assert_eq!(fm.image.as_deref(), Some("unknown.png"));
    }

    #[test]
    fn test_parse_meta_block() {
        let block = FrontMatterBlock::Yaml(r#"
date: 2022-01-15
meta:
  title: Getting started with tmux
  description: Sessions, windows and panes
"#);
        let fm = parse_front_matter(&block).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Getting started with tmux"));
        assert_eq!(fm.description.as_deref(), Some("Sessions, windows and panes"));
        assert!(fm.tags.is_empty());
    }

    #[test]
    fn test_top_level_wins_over_meta() {
        let block = FrontMatterBlock::Yaml("title: Top\nmeta:\n  title: Nested\n");
        let fm = parse_front_matter(&block).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Top"));
    }

    #[test]
    fn test_parse_toml_date() {
        let block = FrontMatterBlock::Toml("title = \"X\"\ndate = 2022-06-01\ntags = [\"rust\"]");
        let fm = parse_front_matter(&block).unwrap();
        assert_eq!(fm.title.as_deref(), Some("X"));
        assert_eq!(fm.date.as_deref(), Some("2022-06-01"));
        assert_eq!(fm.tags, ["rust"]);
    }

    #[test]
    fn test_invalid_yaml() {
        let block = FrontMatterBlock::Yaml("title: [unclosed");
        let err = parse_front_matter(&block).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_empty_block() {
        let fm = parse_front_matter(&FrontMatterBlock::Yaml("\n")).unwrap();
        assert_eq!(fm, FrontMatter::default());
    }
}
