//! # starter-workflows
//!
//! Provisioning runtime for starter CI-workflow templates targeting hosted
//! web applications.
//!
//! Given a template document handed over by an external extension host, this
//! crate negotiates a versioned API with that host, resolves the publish
//! credentials of the deployment target, rewrites the template's placeholder
//! tokens, and hands the finished document back to the host for persistence.
//!
//! ## Overview
//!
//! The crate is organized around a linear provisioning pipeline:
//!
//! ```text
//! Registrar → Provisioner → [Credential fetch, Framework pin] → Transform → Emit
//! ```
//!
//! Everything the pipeline talks to on the outside — the extension host, the
//! secret store, the file sink, the target selector, the credential transport —
//! is a narrow trait in [`host`] or [`transport`], so the core stays testable
//! without a live host or cloud endpoint.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Boundary types (template descriptor, target resource) and well-known identifiers |
//! | [`transform`] | Ordered, first-match-only placeholder substitution |
//! | [`framework`] | Project-file inspection producing an optional tool-version pin |
//! | [`credentials`] | Publish-profile stream consumption |
//! | [`transport`] | Credential retrieval transport (trait + ARM HTTP implementation) |
//! | [`host`] | Collaborator contracts exposed by / to the extension host |
//! | [`provision`] | The provisioning orchestrator |
//! | [`registrar`] | Capability negotiation and provider registration |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use starter_workflows::{registrar, WorkflowProvisioner};
//! # use starter_workflows::host::ExtensionDirectory;
//!
//! # async fn example(directory: Arc<dyn ExtensionDirectory>, provisioner: Arc<WorkflowProvisioner>) -> starter_workflows::Result<()> {
//! // At activation time, bind the provisioner into the host (a no-op when the
//! // host or the requested API version is absent).
//! registrar::register(directory.as_ref(), provisioner).await?;
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod framework;
pub mod host;
pub mod provision;
pub mod registrar;
pub mod transform;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use provision::WorkflowProvisioner;
pub use transform::{TransformRule, TransformRuleSet};
pub use transport::{ArmTransport, CredentialResponse, CredentialTransport};
pub use types::{ProvisioningResult, TargetResource, TemplateDescriptor};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::Error;
