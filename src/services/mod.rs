//! Confidios operations.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every operation takes the `IntegrationState` it works on and the caller's
//! `SessionContext`. Nothing reads ambient globals.

pub mod account;
pub mod admin;
pub mod files;

pub use account::{login, logout};
pub use admin::{admin_login, create_user};
pub use files::{list_files, read_file};
