//! Confidios user session: login and logout against the backend proxy.
//!
//! DESIGN
//! ======
//! Both operations resolve to a plain `bool` and never return an error: the
//! user gets a generic toast, the cause only goes to the debug log.
//!
//! A failed login records the session as logged out. A failed logout leaves
//! the account untouched.
//!
//! Overlapping calls are not serialized. The account ends up reflecting
//! whichever call finished last.

use crate::api::types::{UserLoginRequest, UserLoginResponse};
use crate::error::{ErrorCode, IntegrationError};
use crate::identity::SessionContext;
use crate::notify::Notification;
use crate::state::{IntegrationState, StatusPatch, UserStatus};

pub const LOGIN_SUCCESS_FALLBACK: &str = "Successfully logged in to Confidios";
pub const LOGIN_FAILURE_MESSAGE: &str = "Failed to login to Confidios. Please try again.";
pub const LOGOUT_SUCCESS_FALLBACK: &str = "Successfully logged out from Confidios";
pub const LOGOUT_FAILURE_MESSAGE: &str = "Failed to logout from Confidios. Please try again.";

/// Log the application user into Confidios.
///
/// On success the account becomes a logged-in member with the username and
/// balance reported by the backend. On any failure only `is_logged_in` is
/// set to `false`.
pub async fn login(state: &IntegrationState, ctx: &SessionContext) -> bool {
    match request_login(state, ctx).await {
        Ok(UserLoginResponse { status, confidios_user, confidios_balance }) => {
            tracing::info!(username = ?confidios_user, "confidios login succeeded");
            state
                .account
                .update(|s| s.with_user_status(UserStatus::logged_in(confidios_user, confidios_balance)));
            state
                .notifier
                .notify(Notification::success(message_or(status, LOGIN_SUCCESS_FALLBACK)));
            true
        }
        Err(e) => {
            tracing::debug!(error = %e, code = e.error_code(), "confidios login failed");
            state.account.update(|s| s.with_patch(StatusPatch::logged_out()));
            state.notifier.notify(Notification::error(LOGIN_FAILURE_MESSAGE));
            false
        }
    }
}

/// Log the application user out of Confidios.
///
/// On success the session is marked logged out and the balance dropped.
/// On failure the account is left exactly as it was.
pub async fn logout(state: &IntegrationState, ctx: &SessionContext) -> bool {
    match state.api.user_logout(&ctx.token).await {
        Ok(resp) => {
            tracing::info!("confidios logout succeeded");
            state
                .notifier
                .notify(Notification::success(message_or(resp.status, LOGOUT_SUCCESS_FALLBACK)));
            state.account.update(|s| s.with_patch(StatusPatch::session_ended()));
            true
        }
        Err(e) => {
            let e = IntegrationError::LogoutFailed(e);
            tracing::debug!(error = %e, code = e.error_code(), "confidios logout failed");
            state.notifier.notify(Notification::error(LOGOUT_FAILURE_MESSAGE));
            false
        }
    }
}

async fn request_login(state: &IntegrationState, ctx: &SessionContext) -> Result<UserLoginResponse, IntegrationError> {
    let request = UserLoginRequest { confidios_username: ctx.login_identifier() };
    state
        .api
        .user_login(&ctx.token, &request)
        .await
        .map_err(IntegrationError::LoginFailed)
}

/// Backend message when it is non-empty, `fallback` otherwise.
pub(crate) fn message_or(status: Option<String>, fallback: &str) -> String {
    status
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
