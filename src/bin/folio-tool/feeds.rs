use std::path::{Path, PathBuf};
use std::{fs, io};

use anyhow::Result;
use chrono::Utc;

use folio::feed::{emit_feeds, FeedConfig, Feeds, ATOM_PATH, JSON_PATH, RSS_PATH};

use crate::{load_catalog, load_config, FeedsArgs};

/// Writes the three feeds under `out_dir`, creating `out_dir/rss` if needed.
fn write_feeds(out_dir: &Path, feeds: &Feeds) -> io::Result<Vec<PathBuf>> {
    let files = [
        (RSS_PATH, &feeds.rss),
        (ATOM_PATH, &feeds.atom),
        (JSON_PATH, &feeds.json),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (rel_path, content) in files {
        let path = out_dir.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        written.push(path);
    }

    Ok(written)
}

pub fn feeds_cmd(args: FeedsArgs) -> Result<()> {
    let config = load_config(args.config_path)?;
    let catalog = load_catalog(&config)?;

    let feed_config = FeedConfig::from_config(&config);
    let feeds = emit_feeds(&feed_config, &catalog.newest_first(), Utc::now())?;

    for path in write_feeds(Path::new(&args.out_dir), &feeds)? {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_write_feeds() {
        let out_dir = env::temp_dir().join(format!("folio-feeds-{}", std::process::id()));
        let feeds = Feeds {
            rss: "<rss/>".to_string(),
            atom: "<feed/>".to_string(),
            json: "{}".to_string(),
        };

        let written = write_feeds(&out_dir, &feeds).unwrap();
        assert_eq!(written, vec![
            out_dir.join("rss/feed.xml"),
            out_dir.join("rss/atom.xml"),
            out_dir.join("rss/feed.json"),
        ]);
        assert_eq!(fs::read_to_string(out_dir.join("rss/atom.xml")).unwrap(), "<feed/>");

        fs::remove_dir_all(&out_dir).unwrap();
    }
}
