//! API client with retry and rate limiting
//!
//! [`Client`] owns the transport, the rate limiter and the validated config.
//! Every call goes through [`Client::execute`]:
//! - wait for a rate-limiter token
//! - send one request and check the HTTP status
//! - hand the response to a decoding closure
//! - retry rate-limit, lock and timeout failures with exponential backoff

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::transport::{
    params, RateLimitObserver, RawResponse, RequestSpec, TracingObserver, Transport,
};
use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::decode;
use crate::error::{Error, Result};
use crate::types::RawJson;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the uTools REST proxy
///
/// Cheap to clone; clones share the connection pool and the rate limiter.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    transport: Transport,
    rate_limiter: RateLimiter,
}

impl Client {
    /// Create a client, logging low rate-limit resets through `tracing`
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Create a client with a custom rate-limit observer
    pub fn with_observer(
        config: ClientConfig,
        observer: Arc<dyn RateLimitObserver>,
    ) -> Result<Self> {
        let config = config.validate()?;
        let transport = Transport::new(&config, observer)?;
        let rate_limiter = RateLimiter::new(&RateLimiterConfig::new(config.rate_limit));

        debug!(
            "Created client for {} (rate {}/s, {} retries)",
            config.base_url, config.rate_limit, config.max_retries
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                transport,
                rate_limiter,
            }),
        })
    }

    /// The validated configuration
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Whether user-token endpoints can be called
    pub fn has_auth_token(&self) -> bool {
        self.inner.config.auth_token.is_some()
    }

    /// GET and decode the unwrapped envelope into `T`
    pub async fn get<T, I, K, V>(&self, ctx: &CallContext, path: &str, query: I) -> Result<T>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request(ctx, RequestSpec::get(path).params(params(query)))
            .await
    }

    /// POST a form and decode the unwrapped envelope into `T`
    pub async fn post<T, I, K, V>(&self, ctx: &CallContext, path: &str, form: I) -> Result<T>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request(ctx, RequestSpec::post(path).params(params(form)))
            .await
    }

    /// GET and return the raw body
    pub async fn get_raw<I, K, V>(&self, ctx: &CallContext, path: &str, query: I) -> Result<Bytes>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request_raw(ctx, RequestSpec::get(path).params(params(query)))
            .await
    }

    /// POST a form and return the raw body
    pub async fn post_raw<I, K, V>(&self, ctx: &CallContext, path: &str, form: I) -> Result<Bytes>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request_raw(ctx, RequestSpec::post(path).params(params(form)))
            .await
    }

    /// Execute a spec and decode the unwrapped envelope into `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        spec: RequestSpec,
    ) -> Result<T> {
        self.execute(ctx, &spec, decode::unwrap_into::<T>).await
    }

    /// Execute a spec and return the raw body of the 2xx response
    pub async fn request_raw(&self, ctx: &CallContext, spec: RequestSpec) -> Result<Bytes> {
        self.execute(ctx, &spec, |response: &RawResponse| Ok(response.body.clone()))
            .await
    }

    /// Execute a spec and keep the unwrapped payload as unparsed JSON
    pub async fn fetch_json(&self, ctx: &CallContext, spec: RequestSpec) -> Result<RawJson> {
        self.request(ctx, spec).await
    }

    /// Run the retry loop for one logical call.
    ///
    /// `handle` turns a 2xx response into the caller's value. Errors it
    /// returns go through the same retry classification as transport and
    /// status errors.
    pub async fn execute<T, F>(&self, ctx: &CallContext, spec: &RequestSpec, handle: F) -> Result<T>
    where
        F: Fn(&RawResponse) -> Result<T>,
    {
        self.inner.transport.check_credentials(spec)?;

        let max_retries = self.inner.config.max_retries;
        let mut last_error = None;
        let mut attempt = 0;

        while attempt <= max_retries {
            if attempt > 0 {
                let delay = self.calculate_backoff(attempt);
                warn!(
                    "{} {} failed ({}), attempt {}/{}, retrying in {:?}",
                    spec.method,
                    spec.path,
                    last_error
                        .as_ref()
                        .map_or_else(String::new, ToString::to_string),
                    attempt,
                    max_retries + 1,
                    delay
                );
                ctx.sleep(delay).await?;
            }

            match self.attempt(ctx, spec, &handle).await {
                Ok(value) => {
                    debug!("{} {} succeeded", spec.method, spec.path);
                    return Ok(value);
                }
                Err(e) if e.is_retryable() => {
                    last_error = Some(e);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }

        // Every pass through the loop records an error before it ends.
        Err(last_error.unwrap_or(Error::MaxRetriesExceeded { max_retries }))
    }

    async fn attempt<T, F>(&self, ctx: &CallContext, spec: &RequestSpec, handle: &F) -> Result<T>
    where
        F: Fn(&RawResponse) -> Result<T>,
    {
        self.inner.rate_limiter.wait(ctx).await?;
        let response = self.inner.transport.send(ctx, spec).await?;
        decode::check_status(&response)?;
        handle(&response)
    }

    /// Calculate backoff delay before retry number `attempt` (1-based)
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        let delay = self.inner.config.initial_backoff.saturating_mul(factor);
        std::cmp::min(delay, self.inner.config.max_backoff)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .field("transport", &self.inner.transport)
            .finish_non_exhaustive()
    }
}
