//! Application Configuration
//!
//! Configuration for the Content application layer.

use crate::domain::value_objects::{Keyword, Pagination};
use crate::error::ContentResult;

/// Content application configuration
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Largest `limit` a listing accepts
    pub max_page_size: u32,
    /// `limit` used when the request leaves it out
    pub default_page_size: u32,
    /// Longest search keyword, in characters
    pub max_keyword_length: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_page_size: 100,
            default_page_size: 20,
            max_keyword_length: 100,
        }
    }
}

impl ContentConfig {
    /// Validate request paging, filling in defaults for missing values
    pub fn pagination(&self, limit: Option<i64>, page: Option<i64>) -> ContentResult<Pagination> {
        Pagination::new(
            limit.unwrap_or(i64::from(self.default_page_size)),
            page.unwrap_or(1),
            self.max_page_size,
        )
    }

    pub fn keyword(&self, raw: Option<String>) -> ContentResult<Option<Keyword>> {
        Keyword::parse(raw, self.max_keyword_length)
    }
}
