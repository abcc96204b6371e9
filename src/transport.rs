//! HTTP transport with bounded retry
//!
//! Wraps outbound calls to the backend with a base URL, a fixed
//! per-request timeout, and automatic retry for transient failures.
//! Callers see one logical request/response exchange; the retry loop
//! is invisible to them.
//!
//! Retry policy: a failed attempt is repeated at most [`RETRY_LIMIT`]
//! additional times, sequentially and without delay, and only when no
//! HTTP response was received at all (connect failure, timeout,
//! aborted connection). Any response with an error status is returned
//! immediately. No caching and no deduplication of in-flight
//! requests.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Additional attempts after the first, for transient failures only.
const RETRY_LIMIT: u32 = 2;

/// HTTP client bound to a base endpoint.
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
}

impl Transport {
    /// Build a transport from the given configuration.
    ///
    /// The timeout is fixed at construction and applies to every
    /// attempt individually.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL this transport is bound to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, error status, or a body
    /// that does not decode as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None).await?;
        Self::decode(path, response).await
    }

    /// Issue a POST with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, error status, or a body
    /// that does not decode as `T`.
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| Error::Payload(format!("Failed to encode request body: {e}")))?;
        let response = self.send(Method::POST, path, Some(&body)).await?;
        Self::decode(path, response).await
    }

    /// Perform one logical exchange, retrying transient failures.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt: u32 = 0;

        loop {
            let mut request = self.http.request(method.clone(), &url);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    warn!("{} {} returned status {}", method, path, status);
                    return Err(Error::Status { status, body });
                }
                Err(err) if is_transient(&err) && attempt < RETRY_LIMIT => {
                    attempt += 1;
                    debug!(
                        "Retrying {} {} after transient failure ({}/{}): {}",
                        method, path, attempt, RETRY_LIMIT, err
                    );
                }
                Err(err) => {
                    warn!("{} {} failed: {}", method, path, err);
                    return Err(Error::Transport(err.to_string()));
                }
            }
        }
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| Error::Payload(format!("{path}: {e}")))
    }
}

/// Whether a request failure is eligible for retry.
///
/// Only failures with no HTTP response qualify: connect errors,
/// timeouts, aborted connections. A failure carrying a status came
/// from the server and is surfaced as-is.
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.status().is_none()
}
