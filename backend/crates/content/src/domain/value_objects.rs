//! Domain Value Objects
//!
//! Validated request pieces: pagination, search filters, post and comment
//! bodies. Construction is the only place these rules are checked.

use kernel::id::UserId;

use crate::domain::entities::Post;
use crate::error::{ContentError, ContentResult};

pub const TITLE_MAX_LENGTH: usize = 100;
pub const SPEAKER_MAX_LENGTH: usize = 100;
pub const DETAIL_MAX_LENGTH: usize = 500;
pub const MOVIE_URL_MAX_LENGTH: usize = 200;
pub const COMMENT_MAX_LENGTH: usize = 500;

// ============================================================================
// Pagination
// ============================================================================

/// Page window with `limit >= 1` and `page >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: u32,
    page: u32,
}

impl Pagination {
    /// Validate a requested window; `limit` is capped by `max_limit`
    pub fn new(limit: i64, page: i64, max_limit: u32) -> ContentResult<Self> {
        if limit < 1 || limit > i64::from(max_limit) {
            return Err(ContentError::Validation(format!(
                "limit must be between 1 and {}",
                max_limit
            )));
        }
        let page = u32::try_from(page)
            .ok()
            .filter(|page| *page >= 1)
            .ok_or_else(|| ContentError::Validation("page must be 1 or greater".to_string()))?;

        Ok(Self {
            limit: limit as u32,
            page,
        })
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }

    pub fn page(&self) -> i64 {
        i64::from(self.page)
    }

    /// Rows skipped before this page: `limit * (page - 1)`
    pub fn offset(&self) -> i64 {
        self.limit() * (self.page() - 1)
    }

    /// Slice an already ordered list down to this page
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset() as usize)
            .take(self.limit as usize)
            .collect()
    }
}

/// One page of results plus the size of the full match set
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub total_count: i64,
    pub items: Vec<T>,
}

// ============================================================================
// Search
// ============================================================================

/// Non-empty search term, matched as a case-sensitive substring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    /// An absent or empty keyword means "no filter"
    pub fn parse(raw: Option<String>, max_length: usize) -> ContentResult<Option<Self>> {
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return Ok(None);
        };

        if raw.chars().count() > max_length {
            return Err(ContentError::Validation(format!(
                "keyword must be at most {} characters",
                max_length
            )));
        }

        Ok(Some(Self(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the keyword occurs in the title, the speaker or the detail
    pub fn matches(&self, post: &Post) -> bool {
        [&post.title, &post.speaker, &post.detail]
            .iter()
            .any(|field| field.contains(self.0.as_str()))
    }
}

/// Which posts a listing covers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub keyword: Option<Keyword>,
    /// Restrict to one author; `None` means any
    pub author: Option<UserId>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        let keyword_ok = self
            .keyword
            .as_ref()
            .is_none_or(|keyword| keyword.matches(post));
        let author_ok = self.author.is_none_or(|author| post.user_id == author);
        keyword_ok && author_ok
    }
}

/// Full ListPosts request
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub pagination: Pagination,
    pub filter: PostFilter,
    /// Logged-in caller, used only for the is-favorited flag
    pub viewer: Option<UserId>,
}

// ============================================================================
// Write payloads
// ============================================================================

/// Validated post fields, shared by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    title: String,
    speaker: String,
    detail: String,
    movie_url: String,
}

impl PostContent {
    /// ## Validation Rules
    /// - title, speaker: required, at most 100 characters
    /// - detail: at most 500 characters
    /// - movie URL: at most 200 characters, not otherwise checked
    pub fn new(
        title: impl Into<String>,
        speaker: impl Into<String>,
        detail: impl Into<String>,
        movie_url: impl Into<String>,
    ) -> ContentResult<Self> {
        let title = required("title", title.into(), TITLE_MAX_LENGTH)?;
        let speaker = required("speaker", speaker.into(), SPEAKER_MAX_LENGTH)?;
        let detail = bounded("detail", detail.into(), DETAIL_MAX_LENGTH)?;
        let movie_url = bounded(
            "movie URL",
            movie_url.into().trim().to_string(),
            MOVIE_URL_MAX_LENGTH,
        )?;

        Ok(Self {
            title,
            speaker,
            detail,
            movie_url,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn movie_url(&self) -> &str {
        &self.movie_url
    }
}

/// Comment text: required, at most 500 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    pub fn new(raw: impl Into<String>) -> ContentResult<Self> {
        required("comment", raw.into(), COMMENT_MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn required(field: &str, value: String, max: usize) -> ContentResult<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ContentError::Validation(format!("{} is required", field)));
    }
    bounded(field, value, max)
}

fn bounded(field: &str, value: String, max: usize) -> ContentResult<String> {
    if value.chars().count() > max {
        return Err(ContentError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(value)
}
