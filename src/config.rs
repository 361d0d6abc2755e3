//! Backend proxy configuration parsed from environment variables.

use crate::api::types::ApiError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Optional HTTP timeouts. Unset means the request may wait indefinitely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidiosConfig {
    /// Application API root; Confidios routes hang off `{base_url}/confidios`.
    pub base_url: String,
    pub timeouts: HttpTimeouts,
}

impl Default for ConfidiosConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_string(), timeouts: HttpTimeouts::default() }
    }
}

impl ConfidiosConfig {
    /// Build config for an explicit base URL with no timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not `http://` or `https://`.
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, timeouts: HttpTimeouts::default() })
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `CONFIDIOS_API_BASE_URL`: default `http://localhost:8080/api/v1`
    /// - `CONFIDIOS_REQUEST_TIMEOUT_SECS`: no timeout when absent
    /// - `CONFIDIOS_CONNECT_TIMEOUT_SECS`: no timeout when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not `http://` or `https://`.
    pub fn from_env() -> Result<Self, ApiError> {
        let raw = std::env::var("CONFIDIOS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let base_url = normalize_base_url(&raw)?;
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("CONFIDIOS_REQUEST_TIMEOUT_SECS"),
            connect_secs: env_parse_u64("CONFIDIOS_CONNECT_TIMEOUT_SECS"),
        };
        Ok(Self { base_url, timeouts })
    }
}

fn env_parse_u64(key: &str) -> Option<u64> {
    let Ok(raw) = std::env::var(key) else {
        return None;
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(secs),
        _ => None,
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ApiError::ConfigParse(format!("base URL must be http(s): '{raw}'")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
