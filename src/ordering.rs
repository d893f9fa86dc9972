//! Ordering and selection of posts by publication date.

use std::fmt;
use std::str::FromStr;

use crate::content::PostRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(format!("Invalid sort order {}, expected asc or desc", s)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "asc"),
            SortOrder::Descending => write!(f, "desc"),
        }
    }
}

/// How many posts to keep. `Unbounded` keeps everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    #[default]
    Unbounded,
    AtMost(usize),
}

impl Limit {
    /// Zero and negative counts select nothing.
    pub fn from_count(n: i64) -> Limit {
        if n <= 0 {
            Limit::AtMost(0)
        } else {
            Limit::AtMost(usize::try_from(n).unwrap_or(usize::MAX))
        }
    }
}

/// Sorts by date with a stable sort: posts sharing a date keep their input order.
pub fn order<'a, I>(posts: I, direction: SortOrder) -> Vec<&'a PostRecord>
where
    I: IntoIterator<Item = &'a PostRecord>,
{
    let mut sorted: Vec<&PostRecord> = posts.into_iter().collect();
    match direction {
        SortOrder::Ascending => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Descending => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    sorted
}

pub fn limit<T>(mut posts: Vec<T>, limit: Limit) -> Vec<T> {
    if let Limit::AtMost(n) = limit {
        posts.truncate(n);
    }
    posts
}

pub fn select<'a, I>(posts: I, direction: SortOrder, n: Limit) -> Vec<&'a PostRecord>
where
    I: IntoIterator<Item = &'a PostRecord>,
{
    limit(order(posts, direction), n)
}
