pub mod catalog;
pub mod config;
pub mod content;
pub mod feed;
pub mod logger;
pub mod ordering;
pub mod post_list;
pub mod post_processor;
pub mod query_string;
pub mod server;
pub mod text_utils;
mod test_data;
