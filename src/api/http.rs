//! reqwest client for the Confidios routes of the application backend.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ConfidiosApi;
use super::types::{
    AdminLoginResponse, ApiError, ListFilesResponse, PathRequest, ReadFileResponse, StatusResponse,
    UserCreateRequest, UserCreateResponse, UserLoginRequest, UserLoginResponse,
};
use crate::config::ConfidiosConfig;

pub const USER_LOGIN_PATH: &str = "/confidios/auths/user/login";
pub const USER_LOGOUT_PATH: &str = "/confidios/auths/user/logout";
pub const ADMIN_LOGIN_PATH: &str = "/confidios/auths/login";
pub const CREATE_USER_PATH: &str = "/confidios/users/create";
pub const LIST_FILES_PATH: &str = "/confidios/fs/ls";
pub const READ_FILE_PATH: &str = "/confidios/fs/cat";

pub struct HttpConfidiosApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpConfidiosApi {
    /// Build a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ConfidiosConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<R: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        body: &impl Serialize,
    ) -> Result<R, ApiError> {
        let request = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body);
        execute(request).await
    }

    async fn send_empty<R: DeserializeOwned>(&self, path: &str, token: &str) -> Result<R, ApiError> {
        let request = self.http.post(self.url(path)).bearer_auth(token);
        execute(request).await
    }
}

async fn execute<R: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<R, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    if !status.is_success() {
        return Err(ApiError::Status { status: status.as_u16(), body: text });
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait::async_trait]
impl ConfidiosApi for HttpConfidiosApi {
    async fn user_login(&self, token: &str, request: &UserLoginRequest) -> Result<UserLoginResponse, ApiError> {
        self.send_json(USER_LOGIN_PATH, token, request).await
    }

    async fn user_logout(&self, token: &str) -> Result<StatusResponse, ApiError> {
        self.send_empty(USER_LOGOUT_PATH, token).await
    }

    async fn admin_login(&self, token: &str) -> Result<AdminLoginResponse, ApiError> {
        self.send_empty(ADMIN_LOGIN_PATH, token).await
    }

    async fn create_user(&self, token: &str, request: &UserCreateRequest) -> Result<UserCreateResponse, ApiError> {
        self.send_json(CREATE_USER_PATH, token, request).await
    }

    async fn list_files(&self, token: &str, path: &str) -> Result<ListFilesResponse, ApiError> {
        self.send_json(LIST_FILES_PATH, token, &PathRequest { path })
            .await
    }

    async fn read_file(&self, token: &str, path: &str) -> Result<ReadFileResponse, ApiError> {
        self.send_json(READ_FILE_PATH, token, &PathRequest { path })
            .await
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
