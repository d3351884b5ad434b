//! Song details lookup client
//!
//! Queries the external song details API for release date, lyrics and link of
//! a (group, song) pair. One GET per call: no retries, no backoff.
//!
//! # API Reference
//! - Request: `GET <base URL>?group=<group>&song=<song>`
//! - Response: `{"releaseDate": "16.07.2006", "text": "...", "link": "..."}`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Details returned by the lookup API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetail {
    /// Release date as `DD.MM.YYYY`
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// Lookup errors
#[derive(Debug, Error)]
pub enum LookupError {
    /// Request could not be sent or the connection failed
    #[error("lookup request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with something other than 200
    #[error("lookup API returned status {0}")]
    Status(StatusCode),

    /// Body was not the expected JSON document
    #[error("failed to decode lookup response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Source of song details used when creating songs
#[async_trait]
pub trait LyricsLookup: Send + Sync {
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetail, LookupError>;
}

/// HTTP implementation of [`LyricsLookup`]
pub struct HttpLyricsClient {
    /// HTTP client for API requests
    http_client: Client,
    base_url: Url,
}

impl HttpLyricsClient {
    /// Create a client for the given base URL
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, LookupError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LookupError::Transport)?;

        Ok(Self { http_client, base_url })
    }

    /// Request URL for a lookup; values are percent-encoded and any query
    /// already present on the base URL is kept
    pub fn request_url(&self, group: &str, song: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("group", group)
            .append_pair("song", song);
        url
    }
}

#[async_trait]
impl LyricsLookup for HttpLyricsClient {
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetail, LookupError> {
        let url = self.request_url(group, song);
        debug!(%url, "Querying song details");

        let response = self.http_client.get(url.clone()).send().await.map_err(|e| {
            warn!(%url, error = %e, "Song details request failed");
            LookupError::Transport(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%url, status = status.as_u16(), "Song details API returned an error");
            return Err(LookupError::Status(status));
        }

        let detail: SongDetail = response.json().await.map_err(|e| {
            warn!(%url, error = %e, "Failed to decode song details");
            LookupError::Decode(e)
        })?;

        debug!(group, song, release_date = %detail.release_date, "Song details received");
        Ok(detail)
    }
}
