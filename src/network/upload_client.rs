use std::future::Future;
use std::time::Duration;

use log::{debug, error, info, warn};
use reqwest::Url;

use crate::error_handling::types::UploadError;

use super::types::{UploadOutcome, UploadPayload};

/// Delivers one payload and classifies the result.
///
/// A single call is a single attempt: implementations never retry, and the
/// returned future resolves to exactly one outcome.
pub trait Uploader: Send + Sync {
    fn upload(&self, payload: &UploadPayload) -> impl Future<Output = UploadOutcome> + Send;
}

/// Posts payloads as JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpUploadClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpUploadClient {
    /// Builds a client for `endpoint`, an absolute http(s) URL. `timeout`
    /// bounds the whole request, connect through response headers.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, UploadError> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| UploadError::ClientBuildFailed(e.to_string()))?;
        info!("Upload client targeting {} (timeout {:?})", endpoint, timeout);
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url, UploadError> {
    let url = Url::parse(endpoint)
        .map_err(|e| UploadError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(UploadError::InvalidEndpoint(format!(
            "{}: expected an http(s) URL with a host",
            endpoint
        ))),
    }
}

impl Uploader for HttpUploadClient {
    async fn upload(&self, payload: &UploadPayload) -> UploadOutcome {
        debug!(
            "POST {} ({} encoded byte(s), lat={}, lon={})",
            self.endpoint,
            payload.image.len(),
            payload.latitude,
            payload.longitude
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!("Upload accepted with status {}", resp.status());
                UploadOutcome::Success
            }
            Ok(resp) => {
                warn!("Upload rejected with status {}", resp.status());
                UploadOutcome::ServerRejected(resp.status().as_u16())
            }
            Err(e) => {
                error!("Upload to {} failed: {}", self.endpoint, e);
                UploadOutcome::NetworkFailure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding;
    use crate::location::Coordinates;
    use crate::network::test_server::{refused_addr, silent_server, CannedServer};

    fn payload() -> UploadPayload {
        UploadPayload::new(&[0xFF, 0xD8, 0xFF, 0xE0], Coordinates::new(40.4433, -79.9436))
    }

    fn client(url: &str) -> HttpUploadClient {
        HttpUploadClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_must_be_http_with_host() {
        let client =
            HttpUploadClient::new("https://example.org/upload", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint().as_str(), "https://example.org/upload");
        assert!(matches!(
            HttpUploadClient::new("ftp://example.org/upload", Duration::from_secs(1)),
            Err(UploadError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            HttpUploadClient::new("not a url", Duration::from_secs(1)),
            Err(UploadError::InvalidEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn status_200_is_success() {
        let _ = env_logger::builder().is_test(true).try_init();
        let server = CannedServer::start(200).await;
        let outcome = client(&server.url()).upload(&payload()).await;
        assert_eq!(outcome, UploadOutcome::Success);
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn other_2xx_is_success() {
        let server = CannedServer::start(201).await;
        assert_eq!(
            client(&server.url()).upload(&payload()).await,
            UploadOutcome::Success
        );
    }

    #[tokio::test]
    async fn status_500_is_server_rejected() {
        let server = CannedServer::start(500).await;
        assert_eq!(
            client(&server.url()).upload(&payload()).await,
            UploadOutcome::ServerRejected(500)
        );
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn redirect_is_not_followed() {
        let server = CannedServer::start(302).await;
        assert_eq!(
            client(&server.url()).upload(&payload()).await,
            UploadOutcome::ServerRejected(302)
        );
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn connection_refused_is_network_failure() {
        let addr = refused_addr().await;
        let outcome = client(&format!("http://{}/upload", addr))
            .upload(&payload())
            .await;
        assert!(matches!(outcome, UploadOutcome::NetworkFailure(_)));
    }

    #[tokio::test]
    async fn unanswered_request_times_out_as_network_failure() {
        let addr = silent_server().await;
        let client =
            HttpUploadClient::new(&format!("http://{}/upload", addr), Duration::from_millis(200))
                .unwrap();
        assert!(matches!(
            client.upload(&payload()).await,
            UploadOutcome::NetworkFailure(_)
        ));
    }

    #[tokio::test]
    async fn request_is_a_single_json_post() {
        let server = CannedServer::start(200).await;
        client(&server.url()).upload(&payload()).await;

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert!(req.head.starts_with("POST /upload HTTP/1.1"));
        assert!(req
            .head
            .to_ascii_lowercase()
            .contains("content-type: application/json"));

        let sent: UploadPayload = serde_json::from_slice(&req.body).unwrap();
        assert_eq!(sent, payload());
        assert_eq!(
            encoding::decode(&sent.image).unwrap(),
            vec![0xFF, 0xD8, 0xFF, 0xE0]
        );
    }
}
