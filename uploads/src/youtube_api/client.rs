//! Core YouTube API client functionality and API key handling.

use crate::config::ClientConfig;
use crate::youtube_api::{channels::ChannelListResponse, playlist_items::PlaylistItemListResponse};
use eyre::Context;
use reqwest::Url;
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

/// The largest page size `playlistItems.list` accepts.
pub const MAX_RESULTS_PER_PAGE: u32 = 50;

/// Client for the public, read-only parts of the YouTube Data API v3.
///
/// Requests are authorized with an API key passed as the `key` query parameter, so only
/// public data (channels, playlists, videos) is reachable. The client is cheap to clone and
/// every clone shares the same connection pool.
#[derive(Clone)]
pub struct YouTubeClient {
    /// The API key appended to every request.
    api_key: Arc<str>,
    /// Root URL of the API, without a trailing slash.
    base_url: Arc<str>,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Creates a client for the public YouTube API endpoint with default settings.
    pub fn new(api_key: impl Into<String>) -> eyre::Result<Self> {
        Self::with_config(api_key, &ClientConfig::default())
    }

    /// Creates a client using the given [`ClientConfig`].
    ///
    /// No request is made here. The key is only checked for shape: it must be non-empty and
    /// must not contain whitespace or control characters. Whether YouTube accepts it shows up
    /// on the first API call.
    pub fn with_config(api_key: impl Into<String>, config: &ClientConfig) -> eyre::Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            eyre::bail!("API key must not be empty");
        }
        if api_key
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            eyre::bail!("API key contains whitespace or control characters");
        }

        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("parse API base URL {:?}", config.base_url))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            eyre::bail!("API base URL must use http or https: {}", config.base_url);
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').into(),
            client,
        })
    }

    /// The full URL of an API resource, e.g. `channels` or `playlistItems`.
    pub(crate) fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    /// Makes a `GET` request to the YouTube API with common error handling.
    ///
    /// Adds the API key to the given query parameters and turns any non-success status into
    /// an error carrying the response body, which is where YouTube explains what went wrong
    /// (unknown key, quota exceeded, and so on).
    ///
    /// The request URL carries the key, so transport errors have their URL stripped and only
    /// the key-free endpoint is named in the error.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    pub(crate) async fn make_keyed_request(
        &self,
        resource: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<reqwest::Response> {
        let url = self.endpoint(resource);

        let response = self
            .client
            .get(&url)
            .query(query_params)
            .query(&[("key", &*self.api_key)])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("send GET request to YouTube API: {}", url))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API GET request failed with status {}: {}",
                status_code,
                error_text
            ));
        }

        Ok(response)
    }

    /// Looks up a channel's `contentDetails`, which include its related playlists.
    ///
    /// An unknown channel is not an error at this level; the response simply has no items.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    pub async fn list_channel_content_details(
        &self,
        channel_id: &str,
    ) -> eyre::Result<ChannelListResponse> {
        let query_params = [("part", "contentDetails"), ("id", channel_id)];

        let response = self.make_keyed_request("channels", &query_params).await?;

        let channels: ChannelListResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("parse YouTube channels API response as JSON")?;

        tracing::debug!(
            channel_id,
            total_results = channels.page_info.total_results,
            returned_items = channels.items.len(),
            "fetched channel content details"
        );

        Ok(channels)
    }

    /// Fetches one page of a playlist's items with their `snippet` part.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - The playlist to list
    /// * `max_results` - Maximum number of items to return (1-50)
    /// * `page_token` - Continuation token from the previous page, if any
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    pub async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<PlaylistItemListResponse> {
        let max_results_string = max_results.to_string();
        let mut query_params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results_string.as_str()),
        ];

        if let Some(token) = page_token.filter(|token| !token.is_empty()) {
            query_params.push(("pageToken", token));
        }

        let response = self
            .make_keyed_request("playlistItems", &query_params)
            .await?;

        let playlist_items: PlaylistItemListResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("parse YouTube playlistItems API response as JSON")?;

        tracing::debug!(
            playlist_id,
            total_results = playlist_items.page_info.total_results,
            returned_items = playlist_items.items.len(),
            has_next_page = playlist_items.next_page_token.is_some(),
            "fetched playlist items"
        );

        Ok(playlist_items)
    }
}
