//! Page through the uploaded videos of a YouTube channel.
//!
//! [`PlaylistPager`] turns a channel ID and a 1-based page number into a [`PageResult`]: up to
//! 50 [`VideoRecord`]s plus whether another page follows.
//!
//! ```rust,no_run
//! use youtube_uploads::PlaylistPager;
//!
//! # async fn example() -> Result<(), youtube_uploads::FetchError> {
//! let pager = PlaylistPager::new("AIza...")?;
//! let page = pager.fetch_videos("UC_x5XG1OV2P6uZZ5FSM9Ttw", 2).await?;
//! for video in &page.posts {
//!     println!("{} <{}>", video.title(), video.watch_url());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod pager;
pub mod source;
pub mod video;
pub mod youtube_api;

pub use cancel::{CancelHandle, CancelSignal, cancel_pair};
pub use config::ClientConfig;
pub use error::{ErrorKind, FetchError};
pub use pager::PlaylistPager;
pub use source::{PlaylistEntry, PlaylistItemsPage, VideoSource};
pub use video::{PageResult, VideoRecord};
