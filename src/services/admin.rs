//! Confidios admin features: access check and user provisioning.

use crate::api::types::{UserCreateRequest, UserCreateResponse};
use crate::error::{ErrorCode, IntegrationError};
use crate::identity::SessionContext;
use crate::notify::Notification;
use crate::state::IntegrationState;

use super::account::message_or;

pub const ADMIN_LOGIN_SUCCESS_FALLBACK: &str = "Confidios admin access granted";
pub const ADMIN_LOGIN_FAILURE_MESSAGE: &str = "Failed to access Confidios admin features.";
pub const CREATE_USER_SUCCESS_FALLBACK: &str = "Confidios user created";
pub const CREATE_USER_FAILURE_MESSAGE: &str = "Failed to create Confidios user.";

/// Check admin access and record the outcome in `is_admin_logged_in`.
///
/// The user session status is never touched.
pub async fn admin_login(state: &IntegrationState, ctx: &SessionContext) -> bool {
    match state.api.admin_login(&ctx.token).await {
        Ok(resp) => {
            tracing::info!(user_id = ?resp.user_id, role = ?resp.role, "confidios admin login succeeded");
            state.account.update(|s| s.with_admin_logged_in(true));
            state
                .notifier
                .notify(Notification::success(message_or(resp.status, ADMIN_LOGIN_SUCCESS_FALLBACK)));
            true
        }
        Err(e) => {
            let e = IntegrationError::AdminLoginFailed(e);
            tracing::debug!(error = %e, code = e.error_code(), "confidios admin login failed");
            state.account.update(|s| s.with_admin_logged_in(false));
            state.notifier.notify(Notification::error(ADMIN_LOGIN_FAILURE_MESSAGE));
            false
        }
    }
}

/// Provision `user` on the Confidios side.
///
/// # Errors
///
/// Returns [`IntegrationError::CreateUserFailed`] if the backend call fails.
pub async fn create_user(
    state: &IntegrationState,
    ctx: &SessionContext,
    user: &UserCreateRequest,
) -> Result<UserCreateResponse, IntegrationError> {
    match state.api.create_user(&ctx.token, user).await {
        Ok(resp) => {
            tracing::info!(user_id = %user.user_id, "confidios user created");
            state
                .notifier
                .notify(Notification::success(message_or(resp.status.clone(), CREATE_USER_SUCCESS_FALLBACK)));
            Ok(resp)
        }
        Err(e) => {
            let e = IntegrationError::CreateUserFailed(e);
            tracing::debug!(error = %e, code = e.error_code(), user_id = %user.user_id, "confidios user creation failed");
            state.notifier.notify(Notification::error(CREATE_USER_FAILURE_MESSAGE));
            Err(e)
        }
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
