use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Markdown,
    Mdx,
}

impl ContentFormat {
    pub const EXTENSIONS: [&'static str; 2] = ["md", "mdx"];

    pub fn from_path(path: &Path) -> Option<ContentFormat> {
        match path.extension()?.to_str()? {
            "md" => Some(ContentFormat::Markdown),
            "mdx" => Some(ContentFormat::Mdx),
            _ => None,
        }
    }
}
