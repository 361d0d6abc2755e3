//! Confidios file access through the session-guarded proxy.
//!
//! Reads are billed: the backend reports the balance left after each read,
//! and that balance is written back into the account status. Failures are
//! returned to the caller, which decides how to render them.

use crate::api::types::FileContent;
use crate::error::{ErrorCode, IntegrationError};
use crate::identity::SessionContext;
use crate::state::{IntegrationState, StatusPatch};

/// List the entries under `path`.
///
/// # Errors
///
/// Returns [`IntegrationError::ListFilesFailed`] if the backend call fails,
/// e.g. when no Confidios session is active.
pub async fn list_files(
    state: &IntegrationState,
    ctx: &SessionContext,
    path: &str,
) -> Result<Vec<serde_json::Value>, IntegrationError> {
    let resp = state
        .api
        .list_files(&ctx.token, path)
        .await
        .map_err(IntegrationError::ListFilesFailed)
        .inspect_err(|e| tracing::debug!(error = %e, code = e.error_code(), %path, "confidios ls failed"))?;
    tracing::debug!(%path, entries = resp.files.len(), "confidios ls");
    Ok(resp.files)
}

/// Read the file at `path`, refreshing the stored balance when reported.
///
/// # Errors
///
/// Returns [`IntegrationError::ReadFileFailed`] if the backend call fails.
/// The account is not modified in that case.
pub async fn read_file(
    state: &IntegrationState,
    ctx: &SessionContext,
    path: &str,
) -> Result<FileContent, IntegrationError> {
    let resp = state
        .api
        .read_file(&ctx.token, path)
        .await
        .map_err(IntegrationError::ReadFileFailed)
        .inspect_err(|e| tracing::debug!(error = %e, code = e.error_code(), %path, "confidios cat failed"))?;

    let content = resp.content.unwrap_or_default();
    if let Some(balance) = content.balance.clone() {
        tracing::debug!(%path, %balance, "confidios balance refreshed");
        state.account.update(|s| s.with_patch(StatusPatch::balance(balance)));
    }
    Ok(content)
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
