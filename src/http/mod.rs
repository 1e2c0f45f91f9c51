//! HTTP client module
//!
//! Provides the API client with retry, rate limiting, and backoff.
//!
//! # Features
//!
//! - **Automatic Retries**: Rate-limit, account-lock and timeout failures back off exponentially
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Credential Injection**: `apiKey` on every request, account tokens on user-scoped ones
//! - **Rate-limit Advisory**: Low `x-rate-limit-reset` values reach a [`RateLimitObserver`]

mod client;
mod rate_limit;
mod transport;

pub use client::Client;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{
    params, Params, RateLimitObserver, RawResponse, RequestSpec, TracingObserver, Transport,
    RATE_LIMIT_RESET_HEADER, RATE_LIMIT_RESET_THRESHOLD,
};

#[cfg(test)]
mod tests;
