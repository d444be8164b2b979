//! Music info HTTP client
//!
//! One GET per song creation, no retries. A failed call surfaces directly
//! to the caller.

use std::time::Duration;

use super::{adapter, dto};
use crate::config::EnrichmentConfig;
use crate::enrichment::domain::EnrichmentError;
use crate::model::SongDetail;

/// User agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Music info API client
pub struct MusicInfoClient {
    http_client: reqwest::Client,
    /// `None` when no base URL is configured; lookups then fail with
    /// [`EnrichmentError::Config`].
    base_url: Option<String>,
}

impl MusicInfoClient {
    /// Create a new client from configuration
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses
    /// - Send User-Agent header identifying the application
    /// - Give up after `timeout_secs` (0 disables the timeout)
    pub fn new(config: &EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let mut builder = reqwest::Client::builder().gzip(true).user_agent(USER_AGENT);
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| EnrichmentError::Config(format!("failed to build HTTP client: {e}")))?;

        let base_url = config
            .base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Whether a base URL is configured
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Fetch release date, lyrics and link for a song
    pub async fn fetch_song_detail(
        &self,
        group: &str,
        song: &str,
    ) -> Result<SongDetail, EnrichmentError> {
        let response = self.send_info_request(group, song).await?;
        adapter::to_song_detail(response)
    }

    /// Build the `/info` URL with escaped query parameters
    fn info_url(&self, group: &str, song: &str) -> Result<String, EnrichmentError> {
        let base = self.base_url.as_deref().ok_or_else(|| {
            EnrichmentError::Config("music info API base URL is not configured".to_string())
        })?;

        let url = format!(
            "{}/info?group={}&song={}",
            base,
            urlencoding::encode(group),
            urlencoding::encode(song)
        );
        reqwest::Url::parse(&url)
            .map_err(|e| EnrichmentError::Config(format!("invalid music info API URL {base:?}: {e}")))?;
        Ok(url)
    }

    /// Send the HTTP request and parse the response
    async fn send_info_request(
        &self,
        group: &str,
        song: &str,
    ) -> Result<dto::SongDetailResponse, EnrichmentError> {
        let url = self.info_url(group, song)?;
        tracing::debug!(target: "enrichment", %url, "Requesting song info");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Upstream {
                status: status.as_u16(),
            });
        }

        response
            .json::<dto::SongDetailResponse>()
            .await
            .map_err(|e| EnrichmentError::Decode(e.to_string()))
    }
}
