//! Wire types for the Confidios proxy routes and the transport error.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while talking to the backend proxy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response.
    #[error("API request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("API response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("API response parse failed: {0}")]
    Parse(String),
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Request(_) => "E_API_REQUEST",
            Self::Status { .. } => "E_API_STATUS",
            Self::Parse(_) => "E_API_PARSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// USER SESSION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserLoginRequest {
    pub confidios_username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserLoginResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub confidios_user: Option<String>,
    #[serde(default, deserialize_with = "deserialize_balance")]
    pub confidios_balance: Option<String>,
}

/// Body of routes that only report a status message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
}

// =============================================================================
// ADMIN
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdminLoginResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Application user to provision on the Confidios side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreateRequest {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub profile_image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserCreateResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

// =============================================================================
// FILESYSTEM
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRequest<'a> {
    pub path: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListFilesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub files: Vec<serde_json::Value>,
}

/// File payload plus the balance reported after the read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileContent {
    #[serde(default, deserialize_with = "deserialize_balance")]
    pub balance: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReadFileResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub content: Option<FileContent>,
}

/// Balances arrive as strings or bare numbers depending on the upstream.
fn deserialize_balance<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(balance) => Ok(Some(balance)),
        serde_json::Value::Number(number) => Ok(Some(number.to_string())),
        _ => Err(D::Error::custom("expected balance as string or number")),
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
