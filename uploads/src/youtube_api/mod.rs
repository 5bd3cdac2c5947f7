//! Minimal YouTube Data API v3 client.
//!
//! Only the two read-only calls needed to enumerate a channel's uploads are covered:
//!
//! - [`YouTubeClient::list_channel_content_details`] (`channels.list` with the
//!   `contentDetails` part) resolves a channel to its uploads playlist.
//! - [`YouTubeClient::list_playlist_items`] (`playlistItems.list` with the `snippet` part)
//!   returns one page of a playlist plus the token for the next page.
//!
//! # Uploads playlists
//!
//! Every channel has a system-managed playlist containing all of its public uploads, newest
//! first. Its ID is found under `contentDetails.relatedPlaylists.uploads` of the channel
//! resource. Listing that playlist is far cheaper in quota than `search.list`.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_uploads::youtube_api::{YouTubeClient, MAX_RESULTS_PER_PAGE};
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new("AIza...")?;
//! let channels = client
//!     .list_channel_content_details("UC_x5XG1OV2P6uZZ5FSM9Ttw")
//!     .await?;
//! if let Some(channel) = channels.items.front() {
//!     let uploads = channel.content_details.uploads_playlist_id();
//!     let page = client
//!         .list_playlist_items(uploads, MAX_RESULTS_PER_PAGE, None)
//!         .await?;
//!     for item in page.items {
//!         println!("{}: {}", item.snippet.resource_id.video_id, item.snippet.title);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod playlist_items;
pub mod types;

pub use client::{MAX_RESULTS_PER_PAGE, YouTubeClient};
pub use types::{PageInfo, PagedStream};

pub use channels::{Channel, ChannelContentDetails, ChannelListResponse, RelatedPlaylists};
pub use playlist_items::{
    PlaylistItem, PlaylistItemListResponse, PlaylistItemSnippet, ResourceId,
};
