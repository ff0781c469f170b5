//! Credential retrieval transport.
//!
//! The provisioner only depends on [`CredentialTransport`]; the reqwest-based
//! [`ArmTransport`] is the production implementation, and tests substitute
//! stream-backed fakes.

mod http;

pub use http::ArmTransport;

use crate::types::TargetResource;
use crate::BoxStream;
use bytes::Bytes;

/// Response of a publish-profile retrieval: an optional byte stream.
///
/// `body: None` models a response that carried no readable stream at all,
/// which the resolver reports as [`crate::Error::CredentialUnavailable`]. An
/// empty-but-present stream is a successful, empty credential.
pub struct CredentialResponse {
    pub body: Option<BoxStream<'static, Bytes>>,
}

impl CredentialResponse {
    pub fn with_body(body: BoxStream<'static, Bytes>) -> Self {
        Self { body: Some(body) }
    }

    pub fn without_body() -> Self {
        Self { body: None }
    }
}

/// Streaming retrieval of a target resource's publish profile.
///
/// Slot-qualified vs default retrieval is selected purely on whether
/// `target.slot` is present. Timeouts and retries, if any, live behind this
/// trait; the core never retries.
#[async_trait::async_trait]
pub trait CredentialTransport: Send + Sync {
    async fn fetch_publish_profile(
        &self,
        target: &TargetResource,
    ) -> crate::Result<CredentialResponse>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Transport error: {0}")]
    Other(String),
}
