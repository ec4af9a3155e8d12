//! Seam between the query façade and the operating system.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::errors::CollaboratorError;

/// The two external systems the façade drives.
///
/// Implementations must abandon an in-flight call once `cancel` fires and
/// report [`CollaboratorError::Cancelled`]. Each call is independent; no
/// state may be carried from one call to the next.
pub trait Collaborator: Send + Sync {
    /// Run an AppleScript and return its trimmed combined output.
    fn run_script(
        &self,
        script: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<String, CollaboratorError>> + Send;

    /// Fetch the display inventory as a JSON document.
    fn run_inventory(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<String, CollaboratorError>> + Send;
}
