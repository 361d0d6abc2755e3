//! Client-side Confidios account link.
//!
//! SYSTEM CONTEXT
//! ==============
//! The application backend proxies Confidios. This crate keeps the client's
//! view of the linked account in an observable store and drives the proxy
//! routes that log the user in and out, check admin access, provision users
//! and read files.
//!
//! ```no_run
//! # async fn demo() -> Result<(), confidios_link::api::types::ApiError> {
//! use std::sync::Arc;
//! use confidios_link::{ConfidiosConfig, HttpConfidiosApi, IntegrationState, LogNotifier, SessionContext};
//!
//! let api = HttpConfidiosApi::new(&ConfidiosConfig::from_env()?)?;
//! let state = IntegrationState::new(Arc::new(api), Arc::new(LogNotifier));
//! let ctx = SessionContext::new("token", "user@example.com");
//! if confidios_link::services::login(&state, &ctx).await {
//!     println!("{:?}", state.account.snapshot());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod identity;
pub mod notify;
pub mod services;
pub mod state;
pub mod store;

#[cfg(test)]
mod test_helpers;

pub use api::{ConfidiosApi, HttpConfidiosApi};
pub use config::ConfidiosConfig;
pub use error::{ErrorCode, IntegrationError};
pub use identity::{SessionContext, derive_login_identifier};
pub use notify::{LogNotifier, Notification, NotificationLevel, Notifier};
pub use state::{AccountState, AccountStore, ApiSpecStore, CurrentUserStatus, IntegrationState, StatusPatch, UserStatus};
pub use store::Store;
