//! Single-shot HTTP transport
//!
//! Builds one request from a [`RequestSpec`], injects credentials, sends it
//! and captures status, body and the rate-limit reset header. No retries and
//! no status interpretation happen here.

use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::error::{Error, Result};
use crate::types::{AuthMode, Method};
use bytes::Bytes;
use reqwest::header::ACCEPT;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Request parameters, sent as the query string (GET) or form body (POST)
pub type Params = BTreeMap<String, String>;

/// Header carrying the upstream's rate-limit reset counter
pub const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// Reset values below this trigger the observer
pub const RATE_LIMIT_RESET_THRESHOLD: i64 = 9;

/// Build a [`Params`] map from key/value pairs
pub fn params<I, K, V>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Description of one logical call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub params: Params,
    pub auth: AuthMode,
}

impl RequestSpec {
    /// Create a request spec
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
            auth: AuthMode::ApiKey,
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request with a form-encoded body
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Add a parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a parameter unless the value is absent or empty
    #[must_use]
    pub fn optional(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.param(key, v),
            _ => self,
        }
    }

    /// Add several parameters
    #[must_use]
    pub fn params<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params.extend(params(pairs));
        self
    }

    /// Require the account token in addition to the API key
    #[must_use]
    pub fn user_token(mut self) -> Self {
        self.auth = AuthMode::UserToken;
        self
    }

    /// Set the auth mode
    #[must_use]
    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }
}

/// Status, body and rate-limit signal of one HTTP exchange
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
    pub rate_limit_reset: Option<i64>,
}

impl RawResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
            rate_limit_reset: None,
        }
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Hook invoked when the upstream reports that its rate-limit window is
/// about to reset
pub trait RateLimitObserver: Send + Sync {
    /// Called with the request path and the reset value
    fn on_reset_low(&self, path: &str, reset: i64);
}

/// Default observer: logs a hint to call `token_sync`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RateLimitObserver for TracingObserver {
    fn on_reset_low(&self, path: &str, reset: i64) {
        warn!(
            "{} reported {}={}, consider calling token_sync",
            path, RATE_LIMIT_RESET_HEADER, reset
        );
    }
}

/// HTTP transport bound to one base URL and credential set
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    auth_token: Option<String>,
    ct0: Option<String>,
    observer: Arc<dyn RateLimitObserver>,
}

impl Transport {
    /// Create a transport from a validated config
    pub fn new(config: &ClientConfig, observer: Arc<dyn RateLimitObserver>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            auth_token: config.auth_token.clone(),
            ct0: config.ct0.clone(),
            observer,
        })
    }

    /// Check that the credentials a request needs are configured
    pub fn check_credentials(&self, spec: &RequestSpec) -> Result<()> {
        match spec.auth {
            AuthMode::UserToken if self.auth_token.is_none() => Err(Error::AuthTokenRequired),
            _ => Ok(()),
        }
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{path}", self.base_url))?)
    }

    /// Caller parameters plus injected credentials
    fn merged_params(&self, spec: &RequestSpec) -> Result<Params> {
        self.check_credentials(spec)?;

        let mut params = spec.params.clone();
        params.insert("apiKey".to_string(), self.api_key.clone());
        if spec.auth == AuthMode::UserToken {
            if let Some(token) = &self.auth_token {
                params.insert("auth_token".to_string(), token.clone());
            }
            if let Some(ct0) = &self.ct0 {
                params.insert("ct0".to_string(), ct0.clone());
            }
        }
        Ok(params)
    }

    /// Send one request and capture the raw response
    pub async fn send(&self, ctx: &CallContext, spec: &RequestSpec) -> Result<RawResponse> {
        let params = self.merged_params(spec)?;
        let url = self.build_url(&spec.path)?;

        let mut req = self
            .http
            .request(spec.method.into(), url)
            .header(ACCEPT, "application/json");
        req = match spec.method {
            Method::GET => req.query(&params),
            Method::POST => req.form(&params),
        };

        debug!("Sending {} {}", spec.method, spec.path);
        let response = ctx.run(async { req.send().await.map_err(Error::from) }).await?;

        let status = response.status().as_u16();
        let rate_limit_reset = response
            .headers()
            .get(RATE_LIMIT_RESET_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<i64>().ok());
        let body = ctx
            .run(async { response.bytes().await.map_err(Error::from) })
            .await?;

        debug!("{} {} -> {} ({} bytes)", spec.method, spec.path, status, body.len());

        if let Some(reset) = rate_limit_reset {
            if reset < RATE_LIMIT_RESET_THRESHOLD {
                self.observer.on_reset_low(&spec.path, reset);
            }
        }

        Ok(RawResponse {
            status,
            body,
            rate_limit_reset,
        })
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("has_auth_token", &self.auth_token.is_some())
            .field("has_ct0", &self.ct0.is_some())
            .finish_non_exhaustive()
    }
}
