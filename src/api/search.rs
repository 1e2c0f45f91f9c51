//! Search, trends and explore endpoints

use super::endpoint;
use crate::context::CallContext;
use crate::error::Result;
use crate::http::{Client, RequestSpec};
use crate::pagination::PageIterator;
use crate::types::RawJson;
use serde::{Deserialize, Serialize};

/// Advanced search filters; empty fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Result tab: `Latest`, `Top`, `People`, `Photos`, `Videos`
    #[serde(rename = "type")]
    pub search_type: String,
    pub cursor: String,
    /// Any of these words
    pub any: String,
    /// Posted by this account
    pub from: String,
    /// Minimum likes
    pub likes: String,
    pub mentioning: String,
    /// None of these words
    pub none: String,
    /// Exact phrase
    pub phrase: String,
    /// Minimum replies
    pub replies: String,
    /// Minimum retweets
    pub retweets: String,
    /// Start date, `YYYY-MM-DD`
    pub since: String,
    pub tag: String,
    /// In reply to this account
    pub to: String,
    /// End date, `YYYY-MM-DD`
    pub until: String,
}

impl SearchOptions {
    /// Options with only the result tab set
    pub fn with_type(search_type: impl Into<String>) -> Self {
        Self {
            search_type: search_type.into(),
            ..Self::default()
        }
    }

    fn pairs(&self) -> [(&'static str, &str); 14] {
        [
            ("type", self.search_type.as_str()),
            ("cursor", self.cursor.as_str()),
            ("any", self.any.as_str()),
            ("from", self.from.as_str()),
            ("likes", self.likes.as_str()),
            ("mentioning", self.mentioning.as_str()),
            ("none", self.none.as_str()),
            ("phrase", self.phrase.as_str()),
            ("replies", self.replies.as_str()),
            ("retweets", self.retweets.as_str()),
            ("since", self.since.as_str()),
            ("tag", self.tag.as_str()),
            ("to", self.to.as_str()),
            ("until", self.until.as_str()),
        ]
    }

    fn apply(&self, spec: RequestSpec) -> RequestSpec {
        self.pairs()
            .into_iter()
            .fold(spec, |spec, (key, value)| spec.optional(key, Some(value)))
    }
}

fn feed(name: &str) -> RequestSpec {
    RequestSpec::get(endpoint(name))
}

impl Client {
    /// Search tweets; `search_type` is the result tab (e.g. `Latest`)
    pub async fn search(
        &self,
        ctx: &CallContext,
        query: &str,
        search_type: Option<&str>,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        let spec = RequestSpec::get(endpoint("search"))
            .param("words", query)
            .optional("type", search_type)
            .optional("cursor", cursor);
        self.call(ctx, spec).await
    }

    /// Search with advanced filters
    pub async fn search_with_options(
        &self,
        ctx: &CallContext,
        query: &str,
        options: &SearchOptions,
    ) -> Result<RawJson> {
        let spec = options.apply(RequestSpec::get(endpoint("search")).param("words", query));
        self.call(ctx, spec).await
    }

    /// Iterate over search results; the options' cursor is where iteration starts
    pub fn search_pages(
        &self,
        query: &str,
        options: &SearchOptions,
        max_pages: u32,
    ) -> PageIterator {
        let mut base = options.clone();
        let start = std::mem::take(&mut base.cursor);
        let params = base
            .pairs()
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .chain([("words", query)])
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<Vec<_>>();
        self.page_iterator(endpoint("search"), params, max_pages)
            .starting_at(start)
    }

    /// Typeahead suggestions
    pub async fn search_box(&self, ctx: &CallContext, query: &str) -> Result<RawJson> {
        self.call(ctx, feed("searchBox").param("words", query)).await
    }

    /// Trends for a location (`woeid` 1 is worldwide)
    pub async fn trends(&self, ctx: &CallContext, woeid: Option<&str>) -> Result<RawJson> {
        let spec = feed("trends").optional("id", woeid).optional("woeid", woeid);
        self.call(ctx, spec).await
    }

    pub async fn trending(&self, ctx: &CallContext) -> Result<RawJson> {
        self.call(ctx, feed("trending")).await
    }

    pub async fn news(&self, ctx: &CallContext) -> Result<RawJson> {
        self.call(ctx, feed("news")).await
    }

    pub async fn explore(&self, ctx: &CallContext) -> Result<RawJson> {
        self.call(ctx, feed("explore")).await
    }

    pub async fn sports(&self, ctx: &CallContext) -> Result<RawJson> {
        self.call(ctx, feed("sports")).await
    }

    pub async fn entertainment(&self, ctx: &CallContext) -> Result<RawJson> {
        self.call(ctx, feed("entertainment")).await
    }
}
