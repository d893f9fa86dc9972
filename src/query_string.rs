use std::collections::HashMap;

use crate::ordering::{Limit, SortOrder};

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    /// `limit` absent or not a number keeps `default`.
    pub fn get_limit(&self, default: Limit) -> Limit {
        match self.items.get("limit").map(|v| v.parse::<i64>()) {
            Some(Ok(n)) => Limit::from_count(n),
            _ => default,
        }
    }

    pub fn get_order(&self) -> SortOrder {
        self.items.get("order")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn get_tag(&self) -> Option<&str> {
        self.items.get("tag")
            .map(|t| t.as_str())
            .filter(|t| !t.is_empty())
    }
}
