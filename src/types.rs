//! Boundary types exchanged with the extension host, plus the well-known
//! identifiers this provider registers under.

use serde::{Deserialize, Serialize};

/// Extension identifier of the workflows host looked up at registration time.
pub const WORKFLOWS_EXTENSION_ID: &str = "cschleiden.vscode-github-actions";

/// API version requested from the host's capability manager.
pub const WORKFLOWS_API_VERSION: &str = "1.0.0";

/// Identifier this template provider registers under.
pub const PROVIDER_ID: &str = "deployments/azure-webapps-dotnet-core";

/// Secret name the produced workflow references for its publish profile.
pub const PUBLISH_PROFILE_SECRET_NAME: &str = "AZURE_WEBAPP_PUBLISH_PROFILE";

/// File name used when the descriptor does not suggest one.
pub const DEFAULT_WORKFLOW_FILE_NAME: &str = "starter-template.yml";

/// Placeholder token for the target application name in template bodies.
pub const APP_NAME_PLACEHOLDER: &str = "your-app-name";

/// Placeholder line for the tool version pin in template bodies.
pub const DOTNET_VERSION_PLACEHOLDER: &str = "DOTNET_VERSION: '5'";

/// A workflow template handed over by the host when the user requests this
/// provider's template.
///
/// Immutable once received: the provisioner derives a new content string
/// rather than mutating the descriptor. `content` may legitimately be absent
/// and must be validated before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl TemplateDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            suggested_file_name: None,
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_suggested_file_name(mut self, name: impl Into<String>) -> Self {
        self.suggested_file_name = Some(name.into());
        self
    }
}

/// The deployable resource the produced workflow will target, as resolved by
/// the external selection collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetResource {
    /// Resource group containing the site.
    pub resource_group: String,
    /// Site name; also substituted for [`APP_NAME_PLACEHOLDER`].
    pub name: String,
    /// Deployment slot qualifier, when the user picked a slot rather than the
    /// production site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

impl TargetResource {
    pub fn new(resource_group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_group: resource_group.into(),
            name: name.into(),
            slot: None,
        }
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = Some(slot.into());
        self
    }
}

/// The finished document plus the file name it should be persisted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningResult {
    pub file_name: String,
    pub content: String,
}
