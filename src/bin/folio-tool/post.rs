use std::fmt::Write;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::{PostArgs, PostOutput};

#[derive(Serialize)]
struct NewPostHeader<'a> {
    title: &'a str,
    date: String,
    description: &'a str,
    tags: &'a [String],
}

fn render_header(title: &str, date: &NaiveDate, description: &str, tags: &[String]) -> Result<String> {
    let header = NewPostHeader {
        title,
        date: date.format("%Y-%m-%d").to_string(),
        description,
        tags,
    };
    let yaml = serde_yaml::to_string(&header)?;

    let mut buf = String::new();
    let _ = writeln!(&mut buf, "---");
    let _ = write!(&mut buf, "{}", yaml);
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    Ok(buf)
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");

    buf
}

fn slug_from_title(title: &str) -> String {
    let ascii = unidecode::unidecode(title);

    let mut slug = String::new();
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn write_post(out_dir: &Path, slug: &str, content: &str) -> Result<PathBuf> {
    use std::io::Write;

    let path = out_dir.join(format!("{}.md", slug));
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}

pub fn post_cmd(args: PostArgs) -> Result<()> {
    let date = Local::now().date_naive();
    let description = args.description.as_deref().unwrap_or_default();

    let header = render_header(&args.title, &date, description, &args.tags)?;
    let content = format!("{}{}", header, render_body());

    match args.output {
        PostOutput::Stdout => print!("{}", content),
        PostOutput::File => {
            let slug = slug_from_title(&args.title);
            let path = write_post(Path::new(&args.out_dir), &slug, &content)?;
            println!("Created file {}", path.display());
        }
    }

    Ok(())
}
