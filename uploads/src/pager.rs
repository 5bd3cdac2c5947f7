//! Page-numbered access to a channel's uploads.

use crate::cancel::CancelSignal;
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::source::{PlaylistItemsPage, VideoSource};
use crate::video::{PageResult, VideoRecord};
use crate::youtube_api::{PagedStream, YouTubeClient};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio_stream::Stream;
use tracing::instrument;

/// Fetches numbered pages of a channel's uploaded videos.
///
/// YouTube only offers opaque continuation tokens, so reaching page `n` means requesting and
/// discarding pages `1..n` first. Nothing is remembered between calls: every
/// [`fetch_videos`](Self::fetch_videos) resolves the channel and walks from the first page
/// again. A pager holds no mutable state and can be shared between tasks.
#[derive(Debug, Clone)]
pub struct PlaylistPager<S = YouTubeClient> {
    source: S,
}

impl PlaylistPager<YouTubeClient> {
    /// Creates a pager talking to the public YouTube Data API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_config(api_key, &ClientConfig::default())
    }

    pub fn with_config(
        api_key: impl Into<String>,
        config: &ClientConfig,
    ) -> Result<Self, FetchError> {
        let client = YouTubeClient::with_config(api_key, config)
            .map_err(|e| FetchError::Initialization(format!("{e:#}")))?;
        Ok(Self::from_source(client))
    }
}

impl<S: VideoSource> PlaylistPager<S> {
    pub fn from_source(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches page `page` (1-based) of the uploads of `channel_id`.
    ///
    /// This issues one channel lookup and `page` playlist requests. See
    /// [`fetch_videos_with_cancel`](Self::fetch_videos_with_cancel) to be able to abort a long
    /// walk.
    pub async fn fetch_videos(
        &self,
        channel_id: &str,
        page: i64,
    ) -> Result<PageResult, FetchError> {
        self.fetch_videos_with_cancel(channel_id, page, &CancelSignal::never())
            .await
    }

    /// Like [`fetch_videos`](Self::fetch_videos), but gives up with [`FetchError::Cancelled`]
    /// as soon as `cancel` fires. No request is issued after that.
    #[instrument(skip(self, cancel))]
    pub async fn fetch_videos_with_cancel(
        &self,
        channel_id: &str,
        page: i64,
        cancel: &CancelSignal,
    ) -> Result<PageResult, FetchError> {
        if page < 1 {
            return Err(FetchError::InvalidArgument(
                "page number must be greater than 0".to_string(),
            ));
        }

        let playlist_id = self.resolve_uploads_playlist(channel_id, cancel).await?;

        let mut page_token: Option<String> = None;
        for skipped in 1..page {
            let skipped_page = self
                .list_page(&playlist_id, page_token.as_deref(), cancel)
                .await?;
            page_token = skipped_page.next_page_token;
            if page_token.is_none() {
                tracing::debug!(page, skipped, "playlist ended before requested page");
                return Err(FetchError::OutOfRange { page });
            }
            tracing::trace!(skipped, "skipped page");
        }

        let target = self
            .list_page(&playlist_id, page_token.as_deref(), cancel)
            .await?;

        let has_more = target.next_page_token.is_some();
        let posts: Vec<VideoRecord> = target.items.into_iter().map(VideoRecord::from).collect();

        tracing::debug!(page, returned_items = posts.len(), has_more, "fetched page");
        Ok(PageResult { posts, has_more })
    }

    /// Yields every upload of `channel_id`, newest first, fetching pages as they are needed.
    ///
    /// The first error is yielded and ends the stream. Dropping the stream abandons any request
    /// in flight; use [`stream_uploads_with_cancel`](Self::stream_uploads_with_cancel) to stop
    /// it from elsewhere.
    pub fn stream_uploads<'a>(
        &'a self,
        channel_id: &'a str,
    ) -> impl Stream<Item = Result<VideoRecord, FetchError>> + 'a {
        self.stream_uploads_with_cancel(channel_id, CancelSignal::never())
    }

    /// Like [`stream_uploads`](Self::stream_uploads), but every request is raced against
    /// `cancel`. Once it fires the stream yields [`FetchError::Cancelled`] and ends.
    pub fn stream_uploads_with_cancel<'a>(
        &'a self,
        channel_id: &'a str,
        cancel: CancelSignal,
    ) -> impl Stream<Item = Result<VideoRecord, FetchError>> + 'a {
        let playlist = Arc::new(tokio::sync::OnceCell::<String>::new());
        PagedStream::new(move |page_token: Option<String>| {
            let playlist = Arc::clone(&playlist);
            let cancel = cancel.clone();
            async move {
                let playlist_id = playlist
                    .get_or_try_init(|| self.resolve_uploads_playlist(channel_id, &cancel))
                    .await?;
                let page = self
                    .list_page(playlist_id, page_token.as_deref(), &cancel)
                    .await?;
                let videos: VecDeque<VideoRecord> =
                    page.items.into_iter().map(VideoRecord::from).collect();
                Ok::<_, FetchError>((videos, page.next_page_token))
            }
        })
    }

    async fn resolve_uploads_playlist(
        &self,
        channel_id: &str,
        cancel: &CancelSignal,
    ) -> Result<String, FetchError> {
        let channels = cancel
            .guard(self.source.channel_content_details(channel_id))
            .await?
            .map_err(|e| FetchError::upstream("error getting channel details", e))?;

        let Some(channel) = channels.into_iter().next() else {
            tracing::debug!(channel_id, "channel lookup returned no results");
            return Err(FetchError::NotFound("channel not found".to_string()));
        };

        let playlist_id = channel.related_playlists.uploads;
        tracing::trace!(channel_id, %playlist_id, "resolved uploads playlist");
        Ok(playlist_id)
    }

    /// One `list_playlist_items` call, with an empty continuation token normalized to `None`.
    async fn list_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        cancel: &CancelSignal,
    ) -> Result<PlaylistItemsPage, FetchError> {
        let mut page = cancel
            .guard(self.source.list_playlist_items(playlist_id, page_token))
            .await?
            .map_err(|e| FetchError::upstream("error fetching playlist items", e))?;
        page.next_page_token = page.next_page_token.filter(|token| !token.is_empty());
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::mock::{ScriptedSource, SourceCall};
    use pretty_assertions::assert_eq;

    fn pager(source: ScriptedSource) -> PlaylistPager<ScriptedSource> {
        PlaylistPager::from_source(source)
    }

    #[tokio::test]
    async fn first_page_needs_no_skips() {
        let pager = pager(
            ScriptedSource::new()
                .with_channel("UCabc", "PLxyz")
                .with_page("PLxyz", None, [("a1", "One"), ("a2", "Two")], None),
        );

        let result = pager.fetch_videos("UCabc", 1).await.unwrap();

        assert_eq!(
            result,
            PageResult {
                posts: vec![VideoRecord::new("a1", "One"), VideoRecord::new("a2", "Two")],
                has_more: false,
            }
        );
        assert_eq!(
            pager.source().calls(),
            vec![
                SourceCall::ChannelContentDetails {
                    channel_id: "UCabc".to_string()
                },
                SourceCall::ListPlaylistItems {
                    playlist_id: "PLxyz".to_string(),
                    page_token: None
                },
            ]
        );
    }

    #[tokio::test]
    async fn zero_and_negative_pages_are_rejected_without_calls() {
        let pager = pager(ScriptedSource::new().with_channel("UCabc", "PLxyz"));

        for page in [0, -1, i64::MIN] {
            let err = pager.fetch_videos("UCabc", page).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert_eq!(err.to_string(), "page number must be greater than 0");
        }
        assert!(pager.source().calls().is_empty());
    }

    #[tokio::test]
    async fn empty_next_token_means_no_more() {
        let pager = pager(
            ScriptedSource::new()
                .with_channel("UCabc", "PLxyz")
                .with_page("PLxyz", None, [("a1", "One")], Some("")),
        );

        let result = pager.fetch_videos("UCabc", 1).await.unwrap();
        assert!(!result.has_more);
    }

    #[tokio::test]
    async fn walks_tokens_to_requested_page() {
        let pager = pager(
            ScriptedSource::new()
                .with_channel("UCabc", "PLxyz")
                .with_page("PLxyz", None, [("a1", "One")], Some("T1"))
                .with_page("PLxyz", Some("T1"), [("b1", "Two")], Some("T2"))
                .with_page("PLxyz", Some("T2"), [("c1", "Three")], Some("T3")),
        );

        let result = pager.fetch_videos("UCabc", 3).await.unwrap();

        assert_eq!(result.posts, vec![VideoRecord::new("c1", "Three")]);
        assert!(result.has_more);
        assert_eq!(
            pager.source().page_tokens(),
            vec![None, Some("T1".to_string()), Some("T2".to_string())]
        );
    }

    #[tokio::test]
    async fn stream_uploads_resolves_channel_once() {
        use tokio_stream::StreamExt;

        let pager = pager(
            ScriptedSource::new()
                .with_channel("UCabc", "PLxyz")
                .with_page("PLxyz", None, [("a1", "One"), ("a2", "Two")], Some("T1"))
                .with_page("PLxyz", Some("T1"), [("b1", "Three")], None),
        );

        let ids: Vec<String> = pager
            .stream_uploads("UCabc")
            .map(|video| video.unwrap().id().to_string())
            .collect()
            .await;

        assert_eq!(ids, vec!["a1", "a2", "b1"]);
        let lookups = pager
            .source()
            .calls()
            .into_iter()
            .filter(|call| matches!(call, SourceCall::ChannelContentDetails { .. }))
            .count();
        assert_eq!(lookups, 1);
        assert_eq!(pager.source().playlist_calls(), 2);
    }
}
