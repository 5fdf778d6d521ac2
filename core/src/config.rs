//! Endpoint configuration: backend base URL and request timeout.
//!
//! Built once at startup and shared by every call. Fields are private so the
//! configuration cannot change after construction.

use std::time::Duration;

use crate::error::ConfigError;

/// Development backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:26301";

/// Budget for a single request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

pub const BASE_URL_ENV: &str = "KYC_BASE_URL";
pub const TIMEOUT_MS_ENV: &str = "KYC_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KycConfig {
    base_url: String,
    timeout: Duration,
}

impl KycConfig {
    /// Configuration for `base_url` with the default timeout. A trailing `/`
    /// is trimmed so paths can be appended directly.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout. `Duration::ZERO` selects
    /// `DEFAULT_TIMEOUT`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            timeout
        };
        self
    }

    /// Read `KYC_BASE_URL` and `KYC_TIMEOUT_MS`, falling back to the defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().trim_end_matches('/').is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let timeout = match lookup(TIMEOUT_MS_ENV) {
            Some(raw) => parse_timeout_ms(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self::new(base_url.trim()).with_timeout(timeout))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for KycConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn parse_timeout_ms(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
