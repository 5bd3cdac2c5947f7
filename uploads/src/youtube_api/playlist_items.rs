//! YouTube PlaylistItems API types.

use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `playlistItems.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#playlistItemListResponse`.
    pub kind: String,
    /// A list of playlist items that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<PlaylistItem>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `playlistItem` resource identifies another resource, such as a video, that is included
/// in a playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// The ID that YouTube uses to uniquely identify the playlist item.
    ///
    /// This is *not* the video ID; that lives in [`PlaylistItemSnippet::resource_id`].
    pub id: String,
    pub snippet: PlaylistItemSnippet,
}

/// Basic details about the playlist item, such as its title and position in the playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#snippet>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemSnippet {
    /// The item's title.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The order in which the item appears in the playlist, starting at 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
}

/// Uniquely identifies the resource that is included in the playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceId {
    /// The kind, or type, of the referenced resource, e.g. `youtube#video`.
    pub kind: String,
    /// Set when `kind` is `youtube#video`.
    #[serde(rename = "videoId", default)]
    pub video_id: String,
}
