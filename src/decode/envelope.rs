//! Envelope unwrapping

use crate::error::{ApiError, Error, Result};
use crate::http::RawResponse;
use crate::types::RawJson;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Business code for a successful call
pub const SUCCESS_CODE: i64 = 1;

/// The `{code, data, msg}` wrapper around most payloads
#[derive(Debug, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: Option<i64>,
    /// Raw `data` whenever the key is present, `null` included
    #[serde(default, deserialize_with = "present")]
    pub data: Option<RawJson>,
    #[serde(default)]
    pub msg: Option<String>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<RawJson>, D::Error>
where
    D: Deserializer<'de>,
{
    RawJson::deserialize(deserializer).map(Some)
}

impl Envelope {
    /// Parse a body as an envelope, if it has the right shape
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// Business code, 0 when absent
    pub fn code(&self) -> i64 {
        self.code.unwrap_or(0)
    }

    /// An object only counts as an envelope when it carries data or a code
    pub fn is_valid(&self) -> bool {
        self.data.is_some() || self.code() != 0
    }

    /// A non-zero code other than success
    pub fn is_failure(&self) -> bool {
        !matches!(self.code(), 0 | SUCCESS_CODE)
    }

    /// Text of the data field; `null` when absent
    pub fn data_text(&self) -> &str {
        self.data.as_deref().map_or("null", |raw| raw.get())
    }
}

/// Decode the payload of a 2xx response into `T`.
///
/// Envelope failures become [`Error::Api`]; string-encoded `data` is decoded
/// twice; bodies without an envelope are decoded whole. A `null` payload
/// decodes as `null`, or as `{}` for targets that reject `null`.
pub fn unwrap_into<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    let envelope = match Envelope::parse(&response.body) {
        Some(envelope) if envelope.is_valid() => envelope,
        _ => {
            return serde_json::from_slice(&response.body)
                .map_err(|e| Error::decode("response body", &response.text(), e));
        }
    };

    if envelope.is_failure() {
        return Err(ApiError::new(
            response.status,
            envelope.code(),
            envelope.msg.clone().unwrap_or_default(),
            response.text(),
        )
        .into());
    }

    let data = envelope.data_text();
    if data.starts_with('"') {
        let inner: String =
            serde_json::from_str(data).map_err(|e| Error::decode("data string", data, e))?;
        return serde_json::from_str(&inner)
            .map_err(|e| Error::decode("data string content", &inner, e));
    }

    serde_json::from_str(data).or_else(|e| {
        if data == "null" {
            // A null payload leaves the target at its defaults when it has them.
            serde_json::from_str("{}").map_err(|_| Error::decode("data field", data, e))
        } else {
            Err(Error::decode("data field", data, e))
        }
    })
}
