//! YouTube Channels API types.

use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `channels.list` API call.
///
/// When no channel matches the requested ID, YouTube omits `items` entirely rather than
/// returning an empty list, so it defaults to empty here.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#channelListResponse`.
    pub kind: String,
    /// A list of channels that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<Channel>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `channel` resource as returned when only the `contentDetails` part is requested.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// The ID that YouTube uses to uniquely identify the channel.
    pub id: String,
    #[serde(rename = "contentDetails")]
    pub content_details: ChannelContentDetails,
}

/// The `contentDetails` object encapsulates information about the channel's content.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#contentDetails>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

/// Playlists associated with the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedPlaylists {
    /// The ID of the playlist that contains the channel's uploaded videos.
    pub uploads: String,
    /// The ID of the playlist that contains the channel's liked videos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<String>,
}

impl ChannelContentDetails {
    /// Content details pointing at the given uploads playlist.
    pub fn with_uploads(playlist_id: impl Into<String>) -> Self {
        Self {
            related_playlists: RelatedPlaylists {
                uploads: playlist_id.into(),
                likes: None,
            },
        }
    }

    /// The ID of the playlist holding every video the channel has uploaded.
    pub fn uploads_playlist_id(&self) -> &str {
        &self.related_playlists.uploads
    }
}
