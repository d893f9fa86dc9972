use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};

use folio::catalog::Catalog;
use folio::config::{find_config_path, read_config, Config};
use folio::ordering::SortOrder;

use crate::feeds::feeds_cmd;
use crate::list::list_cmd;
use crate::post::post_cmd;

mod feeds;
mod list;
mod post;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Writes the RSS, Atom and JSON feeds to disk
    Feeds(FeedsArgs),
    /// Lists the posts of the catalog
    List(ListArgs),
    /// Creates a new post
    Post(PostArgs),
}

#[derive(Parser, Debug)]
struct FeedsArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Directory where rss/feed.xml, rss/atom.xml and rss/feed.json are written
    #[arg(short, long, default_value = "public")]
    out_dir: String,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Only the N first posts. Zero or less lists nothing
    #[arg(short, long, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// asc (oldest first) or desc (newest first)
    #[arg(long, default_value_t = SortOrder::Descending)]
    order: SortOrder,
}

#[derive(Parser, Debug)]
struct PostArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Short description used in listings and feeds
    #[arg(short, long)]
    description: Option<String>,

    /// Tag of the post, can be repeated
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Post generation options
    #[arg(short, long, default_value_t = PostOutput::File)]
    output: PostOutput,

    /// Directory of the new post file
    #[arg(long, default_value = ".")]
    out_dir: String,
}

#[derive(Clone, Debug, ValueEnum)]
enum PostOutput {
    /// Writes the new post content to the stdout
    Stdout,
    /// Writes the new post content to {slug}.md
    File,
}

impl std::fmt::Display for PostOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostOutput::Stdout => write!(f, "stdout"),
            PostOutput::File => write!(f, "file"),
        }
    }
}

pub(crate) fn load_config(config_path: Option<String>) -> Result<Config> {
    let config_path = config_path.map(PathBuf::from)
        .or_else(find_config_path)
        .ok_or_else(|| anyhow!("Could not find folio configuration, use --config-path"))?;
    Ok(read_config(&config_path)?)
}

pub(crate) fn load_catalog(config: &Config) -> Result<Catalog> {
    Ok(Catalog::load(&config.paths.posts_dir, config.index_base_name())?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args {
        Args::Feeds(args) => feeds_cmd(args),
        Args::List(args) => list_cmd(args),
        Args::Post(args) => post_cmd(args),
    }
}
