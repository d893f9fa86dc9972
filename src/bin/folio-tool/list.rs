use anyhow::Result;

use folio::content::PostRecord;
use folio::ordering::Limit;
use folio::text_utils::format_date_time;

use crate::{load_catalog, load_config, ListArgs};

fn render_line(post: &PostRecord) -> String {
    let (date, _time) = format_date_time(&post.date);
    format!("{}  {:<48} {}", date, post.slug, post.title)
}

pub fn list_cmd(args: ListArgs) -> Result<()> {
    let config = load_config(args.config_path)?;
    let catalog = load_catalog(&config)?;

    let limit = args.limit.map(Limit::from_count).unwrap_or_default();
    for post in catalog.select(args.order, limit) {
        println!("{}", render_line(post));
    }

    Ok(())
}
