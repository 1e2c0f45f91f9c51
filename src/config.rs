//! Client configuration
//!
//! [`ClientConfig`] is the value object the client is built from. It can be
//! assembled with [`ClientConfig::builder`] or loaded from a YAML file with
//! `XCATCH_*` environment variables taking precedence over file values.
//!
//! ```yaml
//! api_key: "your-utools-key"
//! auth_token: "optional-account-token"
//! ct0: "optional-csrf-cookie"
//! base_url: "https://fapi.uk"
//! timeout_sec: 30
//! max_retries: 3
//! rate_limit: 5.0
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Default upstream base URL
pub const DEFAULT_BASE_URL: &str = "https://fapi.uk";

/// Alternate upstream base URL
pub const ALT_BASE_URL: &str = "https://l2.fapi.uk";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default requests per second
pub const DEFAULT_RATE_LIMIT: f64 = 5.0;

/// Default first backoff delay
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Default backoff ceiling
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = "xcatch.yaml";

/// Configuration for the API client
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// uTools API key, sent as `apiKey` on every request
    pub api_key: String,
    /// Account `auth_token`, required by user-scoped endpoints
    pub auth_token: Option<String>,
    /// Account `ct0` cookie, sent alongside `auth_token` when set
    pub ct0: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Maximum requests per second
    pub rate_limit: f64,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Maximum delay between retries
    pub max_backoff: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            auth_token: None,
            ct0: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            rate_limit: DEFAULT_RATE_LIMIT,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            user_agent: format!("xcatch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &mask(&self.api_key))
            .field("auth_token", &self.auth_token.as_deref().map(mask))
            .field("ct0", &self.ct0.as_deref().map(mask))
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("rate_limit", &self.rate_limit)
            .field("initial_backoff", &self.initial_backoff)
            .field("max_backoff", &self.max_backoff)
            .finish_non_exhaustive()
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "***"
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Check required fields and replace invalid numeric fields with defaults
    pub fn validate(mut self) -> Result<Self> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if self.base_url.trim().is_empty() {
            self.base_url = DEFAULT_BASE_URL.to_string();
        }
        if self.timeout.is_zero() {
            self.timeout = DEFAULT_TIMEOUT;
        }
        if !self.rate_limit.is_finite() || self.rate_limit <= 0.0 {
            self.rate_limit = DEFAULT_RATE_LIMIT;
        }
        if self.initial_backoff.is_zero() {
            self.initial_backoff = DEFAULT_INITIAL_BACKOFF;
        }
        if self.max_backoff < self.initial_backoff {
            self.max_backoff = self.initial_backoff.max(DEFAULT_MAX_BACKOFF);
        }
        self.auth_token = self.auth_token.none_if_empty();
        self.ct0 = self.ct0.none_if_empty();
        Ok(self)
    }

    /// Load configuration from a YAML file (if present) and the process environment.
    ///
    /// `None` means [`DEFAULT_CONFIG_FILE`] in the working directory. A missing
    /// file is not an error; an unreadable or malformed one is logged and skipped.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let mut config = match Self::from_file(path) {
            Ok(config) => config,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Failed to load {}, falling back to defaults/env: {e}", path.display());
                Self::default()
            }
        };
        config.apply_env_with(|key| std::env::var(key).ok());
        config
    }

    /// Load configuration from a YAML file only
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).with_context(|| format!("config file {}", path.display()))
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let mut config = Self::default();
        file.apply(&mut config);
        Ok(config)
    }

    /// Override fields from `XCATCH_*` variables resolved through `lookup`.
    ///
    /// Empty values are ignored, as are numeric values that fail to parse or
    /// are out of range.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).none_if_empty();

        if let Some(v) = get("XCATCH_API_KEY") {
            self.api_key = v;
        }
        if let Some(v) = get("XCATCH_AUTH_TOKEN") {
            self.auth_token = Some(v);
        }
        if let Some(v) = get("XCATCH_CT0") {
            self.ct0 = Some(v);
        }
        if let Some(v) = get("XCATCH_BASE_URL") {
            self.base_url = v;
        }
        if let Some(secs) = get("XCATCH_TIMEOUT_SEC").and_then(|v| v.parse::<u64>().ok()) {
            if secs > 0 {
                self.timeout = Duration::from_secs(secs);
            }
        }
        if let Some(n) = get("XCATCH_MAX_RETRIES").and_then(|v| v.parse::<u32>().ok()) {
            self.max_retries = n;
        }
        if let Some(qps) = get("XCATCH_RATE_LIMIT").and_then(|v| v.parse::<f64>().ok()) {
            if qps.is_finite() && qps > 0.0 {
                self.rate_limit = qps;
            }
        }
    }
}

/// On-disk shape of the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub auth_token: Option<String>,
    pub ct0: Option<String>,
    pub base_url: Option<String>,
    pub timeout_sec: Option<i64>,
    pub max_retries: Option<i64>,
    pub rate_limit: Option<f64>,
}

impl ConfigFile {
    fn apply(self, config: &mut ClientConfig) {
        if let Some(v) = self.api_key {
            config.api_key = v;
        }
        if let Some(v) = self.auth_token {
            config.auth_token = Some(v);
        }
        if let Some(v) = self.ct0 {
            config.ct0 = Some(v);
        }
        if let Some(v) = self.base_url.none_if_empty() {
            config.base_url = v;
        }
        if let Some(secs) = self.timeout_sec.filter(|s| *s > 0) {
            config.timeout = Duration::from_secs(secs as u64);
        }
        if let Some(n) = self.max_retries.and_then(|n| u32::try_from(n).ok()) {
            config.max_retries = n;
        }
        if let Some(qps) = self.rate_limit.filter(|q| q.is_finite() && *q > 0.0) {
            config.rate_limit = qps;
        }
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the account auth token
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.config.auth_token = Some(token.into());
        self
    }

    /// Set the account ct0 cookie
    pub fn ct0(mut self, ct0: impl Into<String>) -> Self {
        self.config.ct0 = Some(ct0.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the rate limit in requests per second
    pub fn rate_limit(mut self, qps: f64) -> Self {
        self.config.rate_limit = qps;
        self
    }

    /// Set backoff bounds
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
