//! Client configuration

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

/// Connection settings for the MailMind backend service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Fixed per-request timeout. The only bound on how long a call
    /// may remain outstanding; there is no cancellation mechanism.
    pub timeout: Duration,
    /// When set, the session runs against the in-memory demo store
    /// instead of the live backend.
    pub demo_mode: bool,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads from `.env` file if present. All variables are optional
    /// (with defaults):
    /// - `MAILMIND_API_BASE` (default: `http://localhost:8000`)
    /// - `MAILMIND_TIMEOUT_MS` (default: `8000`)
    /// - `MAILMIND_DEMO` (default: off; `1` or `true` enables)
    ///
    /// # Errors
    ///
    /// Returns an error if `MAILMIND_TIMEOUT_MS` is not a number.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let timeout_ms: u64 = env::var("MAILMIND_TIMEOUT_MS")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| Error::Config(format!("Invalid MAILMIND_TIMEOUT_MS: {e}")))?;

        let demo_mode = env::var("MAILMIND_DEMO")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            base_url: env::var("MAILMIND_API_BASE")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            timeout: Duration::from_millis(timeout_ms),
            demo_mode,
        })
    }

    /// Configuration pointed at an explicit base URL with the default
    /// timeout. Trailing slashes are trimmed so endpoint paths can be
    /// appended verbatim.
    #[must_use]
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Duration::from_millis(8000),
            demo_mode: false,
        }
    }
}
