//! Canned in-memory [`VideoSource`] for testing code built on the pager.
//!
//! Responses are scripted up front, keyed by channel ID or by `(playlist ID, page token)`.
//! Every call is recorded, so tests can assert exactly which requests were issued and in
//! which order. A call with no scripted response fails like an upstream error would.

use crate::source::{PlaylistEntry, PlaylistItemsPage, VideoSource};
use crate::youtube_api::ChannelContentDetails;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// A request observed by [`ScriptedSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCall {
    ChannelContentDetails {
        channel_id: String,
    },
    ListPlaylistItems {
        playlist_id: String,
        page_token: Option<String>,
    },
}

#[derive(Debug, Clone)]
enum Scripted<T> {
    Respond(T),
    Fail(String),
    /// Never completes, to exercise cancellation.
    Hang,
}

impl<T: Clone> Scripted<T> {
    async fn resolve(&self) -> eyre::Result<T> {
        match self {
            Scripted::Respond(value) => Ok(value.clone()),
            Scripted::Fail(message) => Err(eyre::eyre!("{message}")),
            Scripted::Hang => std::future::pending().await,
        }
    }
}

type PageKey = (String, Option<String>);

#[derive(Debug, Default)]
pub struct ScriptedSource {
    channels: HashMap<String, Scripted<Vec<ChannelContentDetails>>>,
    pages: HashMap<PageKey, Scripted<PlaylistItemsPage>>,
    calls: Mutex<Vec<SourceCall>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel whose uploads live in `uploads_playlist`.
    pub fn with_channel(mut self, channel_id: &str, uploads_playlist: &str) -> Self {
        self.channels.insert(
            channel_id.to_string(),
            Scripted::Respond(vec![ChannelContentDetails::with_uploads(uploads_playlist)]),
        );
        self
    }

    /// A channel lookup that succeeds but matches nothing.
    pub fn with_unknown_channel(mut self, channel_id: &str) -> Self {
        self.channels
            .insert(channel_id.to_string(), Scripted::Respond(Vec::new()));
        self
    }

    pub fn with_channel_error(mut self, channel_id: &str, message: &str) -> Self {
        self.channels
            .insert(channel_id.to_string(), Scripted::Fail(message.to_string()));
        self
    }

    /// The page of `playlist_id` requested with `page_token`. `items` are `(video ID, title)`.
    pub fn with_page<'a>(
        mut self,
        playlist_id: &str,
        page_token: Option<&str>,
        items: impl IntoIterator<Item = (&'a str, &'a str)>,
        next_page_token: Option<&str>,
    ) -> Self {
        let page = PlaylistItemsPage {
            items: items
                .into_iter()
                .map(|(video_id, title)| PlaylistEntry {
                    video_id: video_id.to_string(),
                    title: title.to_string(),
                })
                .collect(),
            next_page_token: next_page_token.map(str::to_string),
        };
        self.pages
            .insert(Self::page_key(playlist_id, page_token), Scripted::Respond(page));
        self
    }

    pub fn with_page_error(
        mut self,
        playlist_id: &str,
        page_token: Option<&str>,
        message: &str,
    ) -> Self {
        self.pages.insert(
            Self::page_key(playlist_id, page_token),
            Scripted::Fail(message.to_string()),
        );
        self
    }

    /// A page request that never completes.
    pub fn with_hanging_page(mut self, playlist_id: &str, page_token: Option<&str>) -> Self {
        self.pages
            .insert(Self::page_key(playlist_id, page_token), Scripted::Hang);
        self
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many `list_playlist_items` calls were made.
    pub fn playlist_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, SourceCall::ListPlaylistItems { .. }))
            .count()
    }

    /// The page tokens passed to `list_playlist_items`, in call order.
    pub fn page_tokens(&self) -> Vec<Option<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SourceCall::ListPlaylistItems { page_token, .. } => Some(page_token),
                SourceCall::ChannelContentDetails { .. } => None,
            })
            .collect()
    }

    fn page_key(playlist_id: &str, page_token: Option<&str>) -> PageKey {
        (playlist_id.to_string(), page_token.map(str::to_string))
    }

    fn record(&self, call: SourceCall) {
        tracing::trace!(?call, "scripted source call");
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl VideoSource for ScriptedSource {
    async fn channel_content_details(
        &self,
        channel_id: &str,
    ) -> eyre::Result<Vec<ChannelContentDetails>> {
        self.record(SourceCall::ChannelContentDetails {
            channel_id: channel_id.to_string(),
        });
        match self.channels.get(channel_id) {
            Some(scripted) => scripted.resolve().await,
            None => Err(eyre::eyre!("no scripted response for channel {channel_id}")),
        }
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> eyre::Result<PlaylistItemsPage> {
        self.record(SourceCall::ListPlaylistItems {
            playlist_id: playlist_id.to_string(),
            page_token: page_token.map(str::to_string),
        });
        match self.pages.get(&Self::page_key(playlist_id, page_token)) {
            Some(scripted) => scripted.resolve().await,
            None => Err(eyre::eyre!(
                "no scripted page of {playlist_id} for token {page_token:?}"
            )),
        }
    }
}
