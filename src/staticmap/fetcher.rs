use super::request::RequestDescriptor;
use super::source::{MapSource, StaticMapApi};
use crate::core::config::ViewerConfig;
use crate::{MapError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("mapview/", env!("CARGO_PKG_VERSION"));

/// Performs one blocking HTTP GET per request and returns the raw image bytes.
///
/// No retries and no caching: every call goes to the network. The client is
/// built once so that TLS and connection pool setup are not repeated for
/// each fetch.
pub struct MapFetcher {
    client: Client,
    source: Box<dyn MapSource>,
    timeout: Duration,
}

impl MapFetcher {
    /// Fetcher for the configured endpoint and timeout
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        let source = StaticMapApi::new(config.base_url.clone()).with_layer(config.layer.clone());
        Self::with_source(Box::new(source), config.timeout)
    }

    pub fn with_source(source: Box<dyn MapSource>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| MapError::InvalidConfig(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            source,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL the fetcher would request, with the API key masked
    pub fn display_url(&self, request: &RequestDescriptor) -> String {
        self.source.url(&request.redacted())
    }

    /// Blocks until the image arrives, the timeout expires or the request fails.
    ///
    /// Image validity is not checked here; only an empty body is rejected.
    pub fn fetch(&self, request: &RequestDescriptor) -> Result<Vec<u8>> {
        let url = self.source.url(request);
        let shown_url = self.display_url(request);
        log::debug!("fetch {:?}", request);

        let transport = |status: Option<u16>, reason: String| MapError::Transport {
            url: shown_url.clone(),
            status,
            reason,
        };

        let resp = self.client.get(&url).send().map_err(|e| {
            let reason = if e.is_timeout() {
                format!("timed out after {}s", self.timeout.as_secs())
            } else {
                e.to_string()
            };
            transport(e.status().map(|s| s.as_u16()), reason)
        })?;

        let status = resp.status();
        if !status.is_success() {
            log::warn!("map request {} failed with HTTP {}", shown_url, status);
            return Err(transport(
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("unexpected status").to_string(),
            ));
        }

        let bytes = resp
            .bytes()
            .map_err(|e| transport(Some(status.as_u16()), e.to_string()))?;
        if bytes.is_empty() {
            return Err(MapError::Decode(format!("empty response body from {shown_url}")));
        }

        log::info!("downloaded map image ({} bytes) for {}", bytes.len(), request.center);
        Ok(bytes.to_vec())
    }
}
