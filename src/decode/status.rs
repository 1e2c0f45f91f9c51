//! HTTP status classification

use crate::error::{ApiError, Result};
use crate::http::RawResponse;
use crate::types::OptionStringExt;
use serde::Deserialize;

/// Error body shape the upstream uses on non-2xx responses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

/// Fail with an [`ApiError`] unless the status is 2xx.
///
/// Code and message come from a `{code, message|msg}` body when present;
/// otherwise the message is the raw body.
pub fn check_status(response: &RawResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    let raw_body = response.text().into_owned();
    let (code, message) = match serde_json::from_slice::<ErrorBody>(&response.body) {
        Ok(body) => (
            body.code.unwrap_or(0),
            body.message.none_if_empty().or(body.msg).unwrap_or_default(),
        ),
        Err(_) => (0, String::new()),
    };
    let message = if message.is_empty() {
        raw_body.clone()
    } else {
        message
    };

    Err(ApiError::new(response.status, code, message, raw_body).into())
}
