//! Endpoint methods
//!
//! Thin wrappers on [`Client`](crate::Client), one per upstream endpoint.
//! Every method returns the envelope-unwrapped payload as [`RawJson`]
//! (decode it further with `serde_json::from_str(raw.get())` or the types
//! in [`models`](crate::models)). List endpoints take an optional cursor;
//! use [`Client::page_iterator`](crate::Client::page_iterator) to walk all
//! pages.
//!
//! [`RawJson`]: crate::types::RawJson

mod search;
mod social;
mod tweets;
mod users;

pub use search::SearchOptions;

use crate::context::CallContext;
use crate::error::Result;
use crate::http::{Client, RequestSpec};
use crate::types::RawJson;

/// Prefix shared by every endpoint
pub const API_PREFIX: &str = "/api/base/apitools";

/// Full path of an endpoint
pub fn endpoint(name: &str) -> String {
    format!("{API_PREFIX}/{}", name.trim_start_matches('/'))
}

impl Client {
    /// Ask the upstream to refresh its robot token.
    ///
    /// Never called automatically; a low `x-rate-limit-reset` only logs a
    /// hint (see [`RateLimitObserver`](crate::RateLimitObserver)).
    pub async fn token_sync(&self, ctx: &CallContext) -> Result<RawJson> {
        self.call(ctx, RequestSpec::get(endpoint("tokenSync"))).await
    }

    async fn call(&self, ctx: &CallContext, spec: RequestSpec) -> Result<RawJson> {
        self.fetch_json(ctx, spec).await
    }
}
