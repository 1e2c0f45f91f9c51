//! Cursor-driven page iterator

use super::cursor::extract_cursors_str;
use super::types::{CollectError, NextPage, PageResult, PageState};
use crate::context::CallContext;
use crate::error::Result;
use crate::http::{params, Client, RequestSpec};
use crate::types::{AuthMode, RawJson};
use tracing::debug;

impl Client {
    /// Iterate over the pages of a cursor-paginated endpoint.
    ///
    /// `max_pages` of 0 means no limit.
    pub fn page_iterator<I, K, V>(
        &self,
        path: impl Into<String>,
        query: I,
        max_pages: u32,
    ) -> PageIterator
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        PageIterator::new(self.clone(), PageState::new(path, params(query), max_pages))
    }
}

/// Fetches one page per call to [`PageIterator::next`], following the
/// cursor each page carries until it runs out, stalls or hits the limit
#[derive(Debug)]
pub struct PageIterator {
    client: Client,
    state: PageState,
}

impl PageIterator {
    /// Create an iterator from an explicit state
    pub fn new(client: Client, state: PageState) -> Self {
        Self { client, state }
    }

    /// Use the account token for every page
    #[must_use]
    pub fn with_auth(mut self, auth: AuthMode) -> Self {
        self.state.auth = auth;
        self
    }

    /// Resume from a cursor returned by an earlier iteration
    #[must_use]
    pub fn starting_at(mut self, cursor: impl Into<String>) -> Self {
        self.state.cursor = Some(cursor.into()).filter(|c: &String| !c.is_empty());
        self
    }

    /// Is another page expected?
    pub fn has_more(&self) -> bool {
        self.state.has_more
    }

    /// Pages fetched so far
    pub fn pages_fetched(&self) -> u32 {
        self.state.pages_fetched
    }

    /// Cursor the next request will send
    pub fn cursor(&self) -> Option<&str> {
        self.state.cursor.as_deref()
    }

    /// Current iteration state
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Fetch the next page.
    ///
    /// On error the state is left as it was, so the same page can be
    /// requested again.
    pub async fn next(&mut self, ctx: &CallContext) -> Result<NextPage> {
        if !self.state.has_more {
            return Ok(NextPage::Done);
        }
        if self.state.limit_reached() {
            debug!("Page limit {} reached for {}", self.state.max_pages, self.state.path);
            self.state.mark_done();
            return Ok(NextPage::Done);
        }

        let spec = RequestSpec::get(self.state.path.clone())
            .params(self.state.request_params())
            .auth(self.state.auth);
        let raw: RawJson = self.client.request(ctx, spec).await?;

        let cursors = extract_cursors_str(raw.get());
        self.state.advance(cursors.next.as_deref());

        debug!(
            "Fetched page {} of {} (next cursor: {:?}, more: {})",
            self.state.pages_fetched, self.state.path, cursors.next, self.state.has_more
        );

        Ok(NextPage::Page(PageResult {
            raw,
            next_cursor: cursors.next,
            previous_cursor: cursors.previous,
        }))
    }

    /// Fetch every remaining page.
    ///
    /// On failure the error carries the pages fetched before it.
    pub async fn collect_all(
        &mut self,
        ctx: &CallContext,
    ) -> std::result::Result<Vec<RawJson>, CollectError> {
        let mut pages = Vec::new();
        loop {
            match self.next(ctx).await {
                Ok(NextPage::Page(page)) => pages.push(page.raw),
                Ok(NextPage::Done) => return Ok(pages),
                Err(source) => return Err(CollectError { pages, source }),
            }
        }
    }
}
