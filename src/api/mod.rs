//! Backend proxy API: the HTTP seam of the integration.
//!
//! DESIGN
//! ======
//! Services talk to `dyn ConfidiosApi` so tests can swap the reqwest client
//! for a scripted double. `HttpConfidiosApi` is the only production
//! implementation; every call carries the application bearer token.

pub mod http;
pub mod types;

pub use http::HttpConfidiosApi;
use types::{
    AdminLoginResponse, ApiError, ListFilesResponse, ReadFileResponse, StatusResponse, UserCreateRequest,
    UserCreateResponse, UserLoginRequest, UserLoginResponse,
};

/// Calls exposed by the application backend under `/confidios`.
#[async_trait::async_trait]
pub trait ConfidiosApi: Send + Sync {
    /// Open a Confidios session for the derived username.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or a
    /// malformed body.
    async fn user_login(&self, token: &str, request: &UserLoginRequest) -> Result<UserLoginResponse, ApiError>;

    /// Close the caller's Confidios session.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ConfidiosApi::user_login`].
    async fn user_logout(&self, token: &str) -> Result<StatusResponse, ApiError>;

    /// Check that the caller may use the admin features.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 403 for non-admin callers.
    async fn admin_login(&self, token: &str) -> Result<AdminLoginResponse, ApiError>;

    /// Provision an application user on the Confidios side (admin only).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ConfidiosApi::admin_login`].
    async fn create_user(&self, token: &str, request: &UserCreateRequest) -> Result<UserCreateResponse, ApiError>;

    /// List a directory; requires an active session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 when no session is active.
    async fn list_files(&self, token: &str, path: &str) -> Result<ListFilesResponse, ApiError>;

    /// Read a file; requires an active session.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ConfidiosApi::list_files`].
    async fn read_file(&self, token: &str, path: &str) -> Result<ReadFileResponse, ApiError>;
}
