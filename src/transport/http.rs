use std::env;
use std::time::Duration;

use bytes::Bytes;
use futures::TryStreamExt;
use keyring::Entry;
use tracing::debug;

use crate::transport::{CredentialResponse, CredentialTransport, TransportError};
use crate::types::TargetResource;
use crate::{BoxStream, Result};

const DEFAULT_BASE_URL: &str = "https://management.azure.com";
const API_VERSION: &str = "2021-02-01";

/// ARM-backed publish-profile transport.
///
/// Issues the site-scoped `publishxml` POST (slot-scoped when the target
/// carries a slot qualifier) and exposes the response body as a byte stream.
pub struct ArmTransport {
    client: reqwest::Client,
    base_url: String,
    subscription_id: String,
    access_token: Option<String>,
}

impl ArmTransport {
    pub fn new(subscription_id: impl Into<String>) -> Result<Self> {
        let access_token = Self::get_access_token();

        // Minimal production-friendly defaults (env-overridable).
        let timeout_secs = env::var("ARM_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let base_url = env::var("ARM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            subscription_id: subscription_id.into(),
            access_token,
        })
    }

    /// Override the management endpoint, e.g. for sovereign clouds or tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn get_access_token() -> Option<String> {
        // 1. Try Keyring
        let entry = Entry::new("starter-workflows", "arm-access-token").ok();
        if let Some(entry) = entry {
            if let Ok(token) = entry.get_password() {
                return Some(token);
            }
        }

        // 2. Try Environment Variable
        env::var("ARM_ACCESS_TOKEN").ok()
    }

    /// Site-scoped publishxml path; slot-scoped when the target has a slot.
    fn publish_profile_path(&self, target: &TargetResource) -> String {
        let site = format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Web/sites/{}",
            self.subscription_id, target.resource_group, target.name
        );
        match &target.slot {
            Some(slot) => format!("{}/slots/{}/publishxml", site, slot),
            None => format!("{}/publishxml", site),
        }
    }
}

#[async_trait::async_trait]
impl CredentialTransport for ArmTransport {
    async fn fetch_publish_profile(&self, target: &TargetResource) -> Result<CredentialResponse> {
        let url = format!(
            "{}{}?api-version={}",
            self.base_url,
            self.publish_profile_path(target),
            API_VERSION
        );
        debug!(site = %target.name, slot = ?target.slot, "requesting publish profile");

        let mut req = self.client.post(&url).json(&serde_json::json!({
            "format": "WebDeploy"
        }));
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(TransportError::Http)?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        // Convert the reqwest bytes stream to our unified BoxStream
        let byte_stream = resp
            .bytes_stream()
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)));
        let body: BoxStream<'static, Bytes> = Box::pin(byte_stream);

        Ok(CredentialResponse::with_body(body))
    }
}
