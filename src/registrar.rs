//! Capability negotiation with the workflows extension host.
//!
//! Registration is best-effort by contract: an absent host, an absent
//! capability manager, or an unserved API version each end negotiation as a
//! traced no-op. The host legitimately may not be installed.

use std::sync::Arc;

use tracing::{debug, info};

use crate::host::{ExtensionDirectory, WorkflowProvider};
use crate::types::{PROVIDER_ID, WORKFLOWS_API_VERSION, WORKFLOWS_EXTENSION_ID};
use crate::Result;

/// Negotiate the workflows API and register `provider` under [`PROVIDER_ID`].
///
/// Runs once at activation time. Calling it again is safe; de-duplication of
/// registrations under the same identifier is the host's contract.
pub async fn register(
    directory: &dyn ExtensionDirectory,
    provider: Arc<dyn WorkflowProvider>,
) -> Result<()> {
    let extension = match directory.get_extension(WORKFLOWS_EXTENSION_ID) {
        Some(extension) => extension,
        None => {
            debug!(extension = WORKFLOWS_EXTENSION_ID, "workflows host not installed, skipping registration");
            return Ok(());
        }
    };

    extension.activate().await?;

    let manager = match extension.capability_manager() {
        Some(manager) => manager,
        None => {
            debug!("workflows host exports no capability manager, skipping registration");
            return Ok(());
        }
    };

    let api = match manager.get_api(WORKFLOWS_API_VERSION) {
        Some(api) => api,
        None => {
            debug!(version = WORKFLOWS_API_VERSION, "workflows API version not served, skipping registration");
            return Ok(());
        }
    };

    api.register_workflow_provider(PROVIDER_ID, provider);
    info!(provider = PROVIDER_ID, "workflow provider registered");
    Ok(())
}
