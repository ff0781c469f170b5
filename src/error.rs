use crate::transport::TransportError;
use thiserror::Error;

/// Unified error type for the provisioning runtime.
///
/// This aggregates the low-level failures of each pipeline stage into
/// actionable, high-level categories. Two outcomes are deliberately *not*
/// errors and never appear here: the user declining to select a target
/// resource, and framework-version resolution yielding no pin — both are
/// ordinary `Ok`/`None` results at their call sites.
#[derive(Debug, Error)]
pub enum Error {
    /// The inbound template descriptor carried no content to transform.
    #[error("workflow template content missing")]
    MissingContent,

    /// The credential retrieval response carried no readable stream at all.
    ///
    /// Distinct from an empty-but-present stream, which resolves to an empty
    /// credential string.
    #[error("could not obtain publish credential: response carried no stream")]
    CredentialUnavailable,

    /// The credential stream failed mid-transfer.
    #[error("publish credential stream failed: {0}")]
    Stream(#[source] TransportError),

    /// Request-level transport failure, before any stream existed.
    #[error("credential transport error: {0}")]
    Transport(#[from] TransportError),

    /// A host collaborator (secret store, file sink, target selector)
    /// reported a failure through its contract.
    #[error("host contract error: {0}")]
    Host(String),
}

impl Error {
    /// Create a host contract error from any displayable cause.
    pub fn host(msg: impl Into<String>) -> Self {
        Error::Host(msg.into())
    }
}
