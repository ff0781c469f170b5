//! The provisioning orchestrator: a linear pipeline from inbound descriptor
//! to emitted workflow file.

use std::sync::Arc;

use tracing::{debug, info};

use crate::host::{SecretStore, TargetSelector, WorkflowProvider, WorkflowSink, WorkspaceRoots};
use crate::transform::{TransformRule, TransformRuleSet};
use crate::transport::CredentialTransport;
use crate::types::{
    ProvisioningResult, TargetResource, TemplateDescriptor, APP_NAME_PLACEHOLDER,
    DEFAULT_WORKFLOW_FILE_NAME, PUBLISH_PROFILE_SECRET_NAME,
};
use crate::{credentials, framework, Error, Result};

/// Provisions starter workflow files for a deployable web application.
///
/// Holds no mutable state; each [`create_workflow`](WorkflowProvider::create_workflow)
/// invocation is independent. The host serializes template-creation requests,
/// so no locking happens here.
pub struct WorkflowProvisioner {
    selector: Arc<dyn TargetSelector>,
    transport: Arc<dyn CredentialTransport>,
    secrets: Arc<dyn SecretStore>,
    sink: Arc<dyn WorkflowSink>,
    roots: Arc<dyn WorkspaceRoots>,
}

impl WorkflowProvisioner {
    pub fn new(
        selector: Arc<dyn TargetSelector>,
        transport: Arc<dyn CredentialTransport>,
        secrets: Arc<dyn SecretStore>,
        sink: Arc<dyn WorkflowSink>,
        roots: Arc<dyn WorkspaceRoots>,
    ) -> Self {
        Self {
            selector,
            transport,
            secrets,
            sink,
            roots,
        }
    }

    /// Build the ordered rule set for a resolved target: the mandatory
    /// app-name rule first, then the framework pin when one resolves.
    async fn build_rules(&self, target: &TargetResource) -> TransformRuleSet {
        let mut rules = TransformRuleSet::new();
        rules.push(TransformRule::literal(
            APP_NAME_PLACEHOLDER,
            target.name.clone(),
        ));

        // Version-pin resolution never fails the pipeline; any miss just
        // leaves the template's own default in place.
        if let Some(root) = self.roots.project_roots().into_iter().next() {
            if let Some(rule) = framework::resolve(&root).await {
                rules.push(rule);
            }
        }

        rules
    }

    /// Run the content stages (rule build + transform + name fallback) for an
    /// already-validated descriptor.
    async fn render(
        &self,
        descriptor: &TemplateDescriptor,
        content: &str,
        target: &TargetResource,
    ) -> ProvisioningResult {
        let rules = self.build_rules(target).await;
        debug!(rules = rules.len(), "applying template transforms");
        let transformed = rules.apply(content);

        // Explicit fallback branch: never emit with an unset file name.
        let file_name = match &descriptor.suggested_file_name {
            Some(name) => name.clone(),
            None => DEFAULT_WORKFLOW_FILE_NAME.to_string(),
        };

        ProvisioningResult {
            file_name,
            content: transformed,
        }
    }
}

#[async_trait::async_trait]
impl WorkflowProvider for WorkflowProvisioner {
    /// Provision one workflow file from `descriptor`.
    ///
    /// Fail-fast: validation, target selection, credential fetch, and secret
    /// registration each abort the invocation on failure, and persistence is
    /// only reached when everything before it succeeded. A cancelled target
    /// selection completes successfully with no further side effects.
    async fn create_workflow(&self, descriptor: TemplateDescriptor) -> Result<()> {
        // 1. Validate
        let content = descriptor
            .content
            .as_deref()
            .ok_or(Error::MissingContent)?;

        // 2. Resolve target
        let target = match self.selector.select_target().await? {
            Some(target) => target,
            None => {
                info!(template = %descriptor.id, "target selection cancelled, nothing to do");
                return Ok(());
            }
        };
        info!(template = %descriptor.id, site = %target.name, slot = ?target.slot, "provisioning workflow");

        // 3. Fetch credential
        let publish_profile =
            credentials::fetch_credential_xml(self.transport.as_ref(), &target).await?;

        // 4. Register secret
        self.secrets
            .set_secret(PUBLISH_PROFILE_SECRET_NAME, &publish_profile)
            .await?;

        // 5-6. Build rule set, transform, resolve file name
        let result = self.render(&descriptor, content, &target).await;

        // 7. Emit
        self.sink
            .create_workflow_file(&result.file_name, &result.content)
            .await?;
        info!(file = %result.file_name, "workflow file emitted");

        Ok(())
    }
}
