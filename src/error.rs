//! Operation-level errors for the Confidios integration.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use crate::api::types::ApiError;

/// Stable machine-readable code plus a retry hint for an error.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Failure of one integration operation. Each variant wraps its cause.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrationError {
    #[error("confidios login failed: {0}")]
    LoginFailed(#[source] ApiError),

    #[error("confidios logout failed: {0}")]
    LogoutFailed(#[source] ApiError),

    #[error("confidios admin login failed: {0}")]
    AdminLoginFailed(#[source] ApiError),

    #[error("confidios user creation failed: {0}")]
    CreateUserFailed(#[source] ApiError),

    #[error("confidios file listing failed: {0}")]
    ListFilesFailed(#[source] ApiError),

    #[error("confidios file read failed: {0}")]
    ReadFileFailed(#[source] ApiError),
}

impl IntegrationError {
    /// The transport error underneath.
    #[must_use]
    pub fn cause(&self) -> &ApiError {
        match self {
            Self::LoginFailed(e)
            | Self::LogoutFailed(e)
            | Self::AdminLoginFailed(e)
            | Self::CreateUserFailed(e)
            | Self::ListFilesFailed(e)
            | Self::ReadFileFailed(e) => e,
        }
    }
}

impl ErrorCode for IntegrationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LoginFailed(_) => "E_LOGIN_FAILED",
            Self::LogoutFailed(_) => "E_LOGOUT_FAILED",
            Self::AdminLoginFailed(_) => "E_ADMIN_LOGIN_FAILED",
            Self::CreateUserFailed(_) => "E_CREATE_USER_FAILED",
            Self::ListFilesFailed(_) => "E_LIST_FILES_FAILED",
            Self::ReadFileFailed(_) => "E_READ_FILE_FAILED",
        }
    }

    fn retryable(&self) -> bool {
        self.cause().retryable()
    }
}
