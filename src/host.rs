//! Collaborator contracts at the extension-host boundary.
//!
//! The host owns UI, sessions, and persistence; this crate only talks to it
//! through the narrow traits below. Everything is object-safe and passed as
//! `Arc<dyn Trait>` so the provisioner can be exercised against fakes.

use std::path::PathBuf;
use std::sync::Arc;

use crate::types::TemplateDescriptor;
use crate::Result;

/// Lookup of installed extensions by identifier. A missing extension is a
/// legitimate configuration, not an error.
pub trait ExtensionDirectory: Send + Sync {
    fn get_extension(&self, id: &str) -> Option<Arc<dyn ExtensionHost>>;
}

/// An installed extension that may expose a capability manager once activated.
#[async_trait::async_trait]
pub trait ExtensionHost: Send + Sync {
    async fn activate(&self) -> Result<()>;

    fn capability_manager(&self) -> Option<Arc<dyn CapabilityManager>>;
}

/// Versioned API negotiation. `None` means the requested version is not
/// served by this host build; callers must treat that as a no-op, not a
/// failure.
pub trait CapabilityManager: Send + Sync {
    fn get_api(&self, version: &str) -> Option<Arc<dyn WorkflowsApi>>;
}

/// The host's workflows API surface, obtained through version negotiation.
///
/// De-duplication of repeated registrations under the same identifier is the
/// host's contract.
pub trait WorkflowsApi: Send + Sync {
    fn register_workflow_provider(&self, id: &str, provider: Arc<dyn WorkflowProvider>);
}

/// Entry point the host invokes when a user selects this provider's template.
#[async_trait::async_trait]
pub trait WorkflowProvider: Send + Sync {
    async fn create_workflow(&self, descriptor: TemplateDescriptor) -> Result<()>;
}

/// Outbound secret registration: the produced document references the secret
/// symbolically rather than embedding it.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    async fn set_secret(&self, name: &str, value: &str) -> Result<()>;
}

/// Outbound persistence of the finished workflow document.
#[async_trait::async_trait]
pub trait WorkflowSink: Send + Sync {
    async fn create_workflow_file(&self, file_name: &str, content: &str) -> Result<()>;
}

/// Resolution of the deployable resource the workflow will target.
///
/// `Ok(None)` means the user cancelled the selection — provisioning then
/// terminates cleanly without touching credentials or persistence.
#[async_trait::async_trait]
pub trait TargetSelector: Send + Sync {
    async fn select_target(&self) -> Result<Option<crate::types::TargetResource>>;
}

/// Local project roots visible to the host, first one preferred. Used only
/// for the optional framework-version pin.
pub trait WorkspaceRoots: Send + Sync {
    fn project_roots(&self) -> Vec<PathBuf>;
}
