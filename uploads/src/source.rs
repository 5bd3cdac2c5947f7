//! The two upstream capabilities the pager depends on.

use crate::youtube_api::{ChannelContentDetails, MAX_RESULTS_PER_PAGE, YouTubeClient};
use std::future::Future;

/// One page of a playlist, reduced to what the pager needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistItemsPage {
    pub items: Vec<PlaylistEntry>,
    /// Token for the following page. `None` or an empty string both mean this is the last page.
    pub next_page_token: Option<String>,
}

/// A single video in a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub video_id: String,
    pub title: String,
}

/// Read access to a video platform's channels and playlists.
///
/// [`YouTubeClient`] is the production implementation. Anything that can answer these two
/// calls (for example a canned in-memory double) can stand in for it.
pub trait VideoSource: Send + Sync {
    /// Looks up the `contentDetails` of the channel with the given ID.
    ///
    /// An unknown channel yields an empty list rather than an error.
    fn channel_content_details(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = eyre::Result<Vec<ChannelContentDetails>>> + Send;

    /// Lists up to 50 items of a playlist with their snippet, starting at `page_token`
    /// (or at the beginning when `None`).
    fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> impl Future<Output = eyre::Result<PlaylistItemsPage>> + Send;
}

impl VideoSource for YouTubeClient {
    async fn channel_content_details(
        &self,
        channel_id: &str,
    ) -> eyre::Result<Vec<ChannelContentDetails>> {
        let response = self.list_channel_content_details(channel_id).await?;
        Ok(response
            .items
            .into_iter()
            .map(|channel| channel.content_details)
            .collect())
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> eyre::Result<PlaylistItemsPage> {
        let response = YouTubeClient::list_playlist_items(
            self,
            playlist_id,
            MAX_RESULTS_PER_PAGE,
            page_token,
        )
        .await?;

        Ok(PlaylistItemsPage {
            items: response
                .items
                .into_iter()
                .map(|item| PlaylistEntry {
                    video_id: item.snippet.resource_id.video_id,
                    title: item.snippet.title,
                })
                .collect(),
            next_page_token: response.next_page_token,
        })
    }
}
