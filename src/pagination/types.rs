//! Pagination types
//!
//! Page results, iteration state and the error returned by `collect_all`.

use crate::error::Error;
use crate::http::Params;
use crate::types::{AuthMode, RawJson};

/// Query parameter carrying the cursor
pub const CURSOR_PARAM: &str = "cursor";

/// One fetched page
#[derive(Debug, Clone)]
pub struct PageResult {
    /// Envelope-unwrapped payload, unparsed
    pub raw: RawJson,
    /// Cursor for the following page, if the payload had one
    pub next_cursor: Option<String>,
    /// Cursor for the preceding page, if the payload had one
    pub previous_cursor: Option<String>,
}

/// Result of advancing a page iterator
#[derive(Debug, Clone)]
pub enum NextPage {
    /// A page was fetched
    Page(PageResult),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if a page was fetched
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }

    /// The fetched page, if any
    pub fn into_page(self) -> Option<PageResult> {
        match self {
            Self::Page(page) => Some(page),
            Self::Done => None,
        }
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone)]
pub struct PageState {
    /// Endpoint path
    pub path: String,
    /// Parameters sent with every page
    pub base_params: Params,
    /// Credentials the endpoint needs
    pub auth: AuthMode,
    /// Cursor to send with the next request
    pub cursor: Option<String>,
    /// Is another page expected?
    pub has_more: bool,
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Page limit; 0 means unlimited
    pub max_pages: u32,
}

impl PageState {
    /// Create the state for a fresh iteration
    pub fn new(path: impl Into<String>, base_params: Params, max_pages: u32) -> Self {
        Self {
            path: path.into(),
            base_params,
            auth: AuthMode::ApiKey,
            cursor: None,
            has_more: true,
            pages_fetched: 0,
            max_pages,
        }
    }

    /// Whether the page limit has been reached
    pub fn limit_reached(&self) -> bool {
        self.max_pages > 0 && self.pages_fetched >= self.max_pages
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.has_more = false;
    }

    /// Parameters for the next request
    pub fn request_params(&self) -> Params {
        let mut params = self.base_params.clone();
        if let Some(cursor) = &self.cursor {
            params.insert(CURSOR_PARAM.to_string(), cursor.clone());
        }
        params
    }

    /// Record a fetched page and its next cursor.
    ///
    /// A missing cursor, or one equal to the cursor just sent, ends the
    /// iteration.
    pub fn advance(&mut self, next_cursor: Option<&str>) {
        self.pages_fetched += 1;
        match next_cursor {
            Some(next) if !next.is_empty() && self.cursor.as_deref() != Some(next) => {
                self.cursor = Some(next.to_string());
            }
            _ => self.mark_done(),
        }
    }
}

/// Pagination stopped by an error; carries the pages fetched before it
#[derive(Debug, thiserror::Error)]
#[error("pagination stopped after {} page(s): {source}", .pages.len())]
pub struct CollectError {
    /// Pages fetched before the failure, in order
    pub pages: Vec<RawJson>,
    /// The failure
    #[source]
    pub source: Error,
}

impl CollectError {
    /// Split into the partial pages and the error
    pub fn into_parts(self) -> (Vec<RawJson>, Error) {
        (self.pages, self.source)
    }
}

impl From<CollectError> for Error {
    fn from(err: CollectError) -> Self {
        err.source
    }
}
