//! Caller identity passed explicitly into every integration call.

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;

/// Backend username derived from an email address.
///
/// The first `@` becomes `-at-` and the result is lowercased. The backend
/// computes the same mapping, so changing it breaks existing accounts.
#[must_use]
pub fn derive_login_identifier(email: &str) -> String {
    email.replacen('@', "-at-", 1).to_lowercase()
}

/// Application session the integration acts on behalf of.
#[derive(Clone)]
pub struct SessionContext {
    /// Bearer token for the application backend.
    pub token: String,
    /// Email address of the signed-in application user.
    pub email: String,
}

impl SessionContext {
    #[must_use]
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self { token: token.into(), email: email.into() }
    }

    #[must_use]
    pub fn login_identifier(&self) -> String {
        derive_login_identifier(&self.email)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}
