//! Confidios account state as seen by the client.
//!
//! DESIGN
//! ======
//! The account status starts out `Absent` and only becomes `Present` once a
//! login attempt has happened. Partial updates are expressed as a
//! `StatusPatch`: every field either keeps, sets or clears its value, and
//! patching an `Absent` status yields a `Present` one that carries only the
//! patched fields.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::api::ConfidiosApi;
use crate::notify::Notifier;
use crate::store::Store;

// =============================================================================
// USER STATUS
// =============================================================================

/// Third-party account status for the current application user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    /// The user has a linked Confidios account.
    pub is_member: Option<bool>,
    /// The Confidios session is currently authenticated.
    pub is_logged_in: Option<bool>,
    pub username: Option<String>,
    pub balance: Option<String>,
}

impl UserStatus {
    /// Status after a successful login: linked and authenticated.
    #[must_use]
    pub fn logged_in(username: Option<String>, balance: Option<String>) -> Self {
        Self { is_member: Some(true), is_logged_in: Some(true), username, balance }
    }
}

/// Whether a login attempt has produced any account status yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CurrentUserStatus {
    #[default]
    Absent,
    Present(UserStatus),
}

impl CurrentUserStatus {
    #[must_use]
    pub fn as_present(&self) -> Option<&UserStatus> {
        match self {
            Self::Absent => None,
            Self::Present(status) => Some(status),
        }
    }

    /// `true` only when present and explicitly marked logged in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.as_present()
            .and_then(|s| s.is_logged_in)
            .unwrap_or(false)
    }

    /// Apply `patch` on top of the current status.
    #[must_use]
    pub fn patched(&self, patch: StatusPatch) -> Self {
        let base = self.as_present().cloned().unwrap_or_default();
        Self::Present(patch.apply(base))
    }
}

impl Serialize for CurrentUserStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_present().serialize(serializer)
    }
}

// =============================================================================
// PATCH
// =============================================================================

/// Per-field instruction inside a [`StatusPatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Keep,
    Set(T),
    Clear,
}

impl<T> Field<T> {
    fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Keep => current,
            Self::Set(value) => Some(value),
            Self::Clear => None,
        }
    }
}

/// Shallow merge over [`UserStatus`]. Untouched fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPatch {
    pub is_member: Field<bool>,
    pub is_logged_in: Field<bool>,
    pub username: Field<String>,
    pub balance: Field<String>,
}

impl StatusPatch {
    /// Marks the session as not authenticated, nothing else.
    #[must_use]
    pub fn logged_out() -> Self {
        Self { is_logged_in: Field::Set(false), ..Self::default() }
    }

    /// Marks the session as ended and drops the balance.
    #[must_use]
    pub fn session_ended() -> Self {
        Self { is_logged_in: Field::Set(false), balance: Field::Clear, ..Self::default() }
    }

    #[must_use]
    pub fn balance(balance: String) -> Self {
        Self { balance: Field::Set(balance), ..Self::default() }
    }

    fn apply(self, status: UserStatus) -> UserStatus {
        UserStatus {
            is_member: self.is_member.apply(status.is_member),
            is_logged_in: self.is_logged_in.apply(status.is_logged_in),
            username: self.username.apply(status.username),
            balance: self.balance.apply(status.balance),
        }
    }
}

// =============================================================================
// ACCOUNT STATE
// =============================================================================

/// Everything the UI knows about the Confidios integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    pub is_admin_logged_in: bool,
    pub current_user_status: CurrentUserStatus,
}

impl AccountState {
    #[must_use]
    pub fn with_user_status(&self, status: UserStatus) -> Self {
        Self { current_user_status: CurrentUserStatus::Present(status), ..self.clone() }
    }

    #[must_use]
    pub fn with_patch(&self, patch: StatusPatch) -> Self {
        Self { current_user_status: self.current_user_status.patched(patch), ..self.clone() }
    }

    #[must_use]
    pub fn with_admin_logged_in(&self, is_admin_logged_in: bool) -> Self {
        Self { is_admin_logged_in, ..self.clone() }
    }
}

pub type AccountStore = Store<AccountState>;

/// API specification document reference, owned separately from the account.
pub type ApiSpecStore = Store<Option<String>>;

// =============================================================================
// INTEGRATION STATE
// =============================================================================

/// Everything a Confidios operation needs, passed explicitly to each call.
/// Clones share the same stores, API client and notifier.
#[derive(Clone)]
pub struct IntegrationState {
    pub api: Arc<dyn ConfidiosApi>,
    pub account: AccountStore,
    pub api_spec: ApiSpecStore,
    pub notifier: Arc<dyn Notifier>,
}

impl IntegrationState {
    /// Fresh state: admin flag off, no user status, no API spec.
    #[must_use]
    pub fn new(api: Arc<dyn ConfidiosApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, account: AccountStore::default(), api_spec: ApiSpecStore::default(), notifier }
    }

    /// Share an existing account store, e.g. one a UI already observes.
    #[must_use]
    pub fn with_account(mut self, account: AccountStore) -> Self {
        self.account = account;
        self
    }
}
