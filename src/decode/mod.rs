//! Response decoding module
//!
//! # Overview
//!
//! The upstream wraps most payloads in an envelope:
//!
//! ```json
//! {"code": 1, "data": {...}, "msg": "SUCCESS"}
//! ```
//!
//! `code` 1 (or 0) means success; anything else is a business failure even
//! when the HTTP status is 200. `data` is sometimes itself a JSON document
//! encoded as a string. Responses without a recognisable envelope are
//! decoded as a whole.
//!
//! [`check_status`] turns non-2xx responses into [`ApiError`](crate::ApiError)s
//! and [`unwrap_into`] decodes the payload of 2xx ones.

mod envelope;
mod status;

pub use envelope::{unwrap_into, Envelope, SUCCESS_CODE};
pub use status::check_status;

/// Maximum characters of payload kept in decode errors
pub const SNIPPET_LIMIT: usize = 500;

/// Truncate `s` to at most `max` characters, appending `...` when cut
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
