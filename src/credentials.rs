//! Publish-credential resolution: fetch the target's publish profile and
//! assemble the XML bundle from the response stream.

use bytes::BytesMut;
use futures::StreamExt;
use tracing::debug;

use crate::transport::CredentialTransport;
use crate::types::TargetResource;
use crate::{Error, Result};

/// Fetch the publish-profile XML for `target`.
///
/// Consumes the transport's byte stream to completion, concatenating chunks
/// in delivery order; resolves only once the stream ends. Fails with
/// [`Error::CredentialUnavailable`] when the response carries no stream, and
/// with [`Error::Stream`] when the stream errors mid-transfer — chunks
/// received before the error are discarded, never returned as a partial
/// credential.
///
/// Results are not cached; every call re-fetches.
pub async fn fetch_credential_xml(
    transport: &dyn CredentialTransport,
    target: &TargetResource,
) -> Result<String> {
    let response = transport.fetch_publish_profile(target).await?;

    let mut stream = match response.body {
        Some(stream) => stream,
        None => return Err(Error::CredentialUnavailable),
    };

    // Accumulate raw bytes and decode once after completion: chunk boundaries
    // may fall inside a multi-byte character.
    let mut buf = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => buf.extend_from_slice(&bytes),
            Err(Error::Transport(e)) => return Err(Error::Stream(e)),
            Err(e) => return Err(e),
        }
    }

    let xml = String::from_utf8_lossy(&buf).into_owned();
    debug!(site = %target.name, bytes = xml.len(), "publish profile assembled");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{CredentialResponse, TransportError};
    use bytes::Bytes;

    struct FakeTransport {
        response: std::sync::Mutex<Option<CredentialResponse>>,
    }

    impl FakeTransport {
        fn new(response: CredentialResponse) -> Self {
            Self {
                response: std::sync::Mutex::new(Some(response)),
            }
        }
    }

    #[async_trait::async_trait]
    impl CredentialTransport for FakeTransport {
        async fn fetch_publish_profile(
            &self,
            _target: &TargetResource,
        ) -> Result<CredentialResponse> {
            Ok(self.response.lock().unwrap().take().unwrap())
        }
    }

    fn target() -> TargetResource {
        TargetResource::new("rg", "contoso-site")
    }

    fn chunk_stream(chunks: Vec<Result<&'static str>>) -> CredentialResponse {
        let stream = tokio_stream::iter(
            chunks
                .into_iter()
                .map(|c| c.map(Bytes::from))
                .collect::<Vec<_>>(),
        );
        CredentialResponse::with_body(Box::pin(stream))
    }

    #[tokio::test]
    async fn test_concatenates_chunks_in_delivery_order() {
        let transport = FakeTransport::new(chunk_stream(vec![
            Ok("<pub"),
            Ok("lishData"),
            Ok("/>"),
        ]));

        let xml = fetch_credential_xml(&transport, &target()).await.unwrap();
        assert_eq!(xml, "<publishData/>");
    }

    #[tokio::test]
    async fn test_multibyte_character_split_across_chunks() {
        // "é" is 0xC3 0xA9; the boundary falls between its two bytes.
        let chunks: Vec<Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"<publishData userName=\"d\xC3")),
            Ok(Bytes::from_static(b"\xA9ploy\"/>")),
        ];
        let transport = FakeTransport::new(CredentialResponse::with_body(Box::pin(
            tokio_stream::iter(chunks),
        )));

        let xml = fetch_credential_xml(&transport, &target()).await.unwrap();
        assert_eq!(xml, "<publishData userName=\"déploy\"/>");
    }

    #[tokio::test]
    async fn test_missing_stream_is_credential_unavailable() {
        let transport = FakeTransport::new(CredentialResponse::without_body());

        let err = fetch_credential_xml(&transport, &target())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CredentialUnavailable));
    }

    #[tokio::test]
    async fn test_empty_stream_yields_empty_credential() {
        let transport = FakeTransport::new(chunk_stream(vec![]));

        let xml = fetch_credential_xml(&transport, &target()).await.unwrap();
        assert_eq!(xml, "");
    }

    #[tokio::test]
    async fn test_mid_stream_error_propagates_and_drops_partial_data() {
        let transport = FakeTransport::new(chunk_stream(vec![
            Ok("<pub"),
            Err(Error::Transport(TransportError::Other(
                "connection reset".to_string(),
            ))),
        ]));

        let err = fetch_credential_xml(&transport, &target())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Stream(_)));
    }
}
