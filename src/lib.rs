// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # xcatch
//!
//! Async client SDK for the uTools REST proxy, which exposes social-network
//! data (profiles, posts, search, relationships, lists, communities).
//!
//! ## Features
//!
//! - **Auth Injection**: API key on every request, user token on the endpoints that need it
//! - **Rate Limiting**: Token bucket gate (capacity 1) at a configured QPS
//! - **Retry**: Exponential backoff, retrying only rate limits, 403 locks and timeouts
//! - **Envelope Unwrapping**: `{code, data, msg}` with double-encoded `data` strings
//! - **Cursor Pagination**: Heuristic cursor extraction with stall detection
//! - **Cancellation**: Every suspension point races a [`CallContext`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use xcatch::{CallContext, Client, ClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder().api_key("my-key").build();
//!     let client = Client::new(config)?;
//!     let ctx = CallContext::new().with_timeout(std::time::Duration::from_secs(60));
//!
//!     let profile = client.user_by_screen_name_v2(&ctx, "jack").await?;
//!     println!("{}", profile.get());
//!
//!     let mut pages = client.page_iterator("/api/base/apitools/userTweetsV2", [("userId", "12")], 3);
//!     while let xcatch::NextPage::Page(page) = pages.next(&ctx).await? {
//!         println!("{:?}", page.next_cursor);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │        Endpoint methods (api::users / tweets / search / …)   │
//! └──────────────────────────────┬───────────────────────────────┘
//!            PageIterator ───────┤
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │ Retry Driver: backoff → RateLimiter::wait → Transport::send  │
//! │               → check_status → unwrap_into / raw body        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and retry classification
pub mod error;

/// Common types and type aliases
pub mod types;

/// Cancellation and deadline propagation
pub mod context;

/// Client configuration and loading
pub mod config;

/// HTTP client with retry and rate limiting
pub mod http;

/// Response envelope unwrapping
pub mod decode;

/// Cursor extraction and page iteration
pub mod pagination;

/// Per-endpoint operations
pub mod api;

/// Typed response models
pub mod models;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::SearchOptions;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use context::CallContext;
pub use error::{ApiError, Error, Result};
pub use http::{Client, RateLimitObserver, RequestSpec, TracingObserver};
pub use pagination::{CollectError, NextPage, PageIterator, PageResult};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
