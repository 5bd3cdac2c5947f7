use crate::source::PlaylistEntry;
use serde::Serialize;

const EMBED_URL_PREFIX: &str = "https://www.youtube.com/embed/";
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// A single uploaded video, ready to be rendered or embedded.
///
/// Serializes as `{ "id", "title", "embedUrl", "url" }`. Both URLs are derived from the video
/// ID when the record is built and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VideoRecord {
    id: String,
    title: String,
    #[serde(rename = "embedUrl")]
    embed_url: String,
    #[serde(rename = "url")]
    watch_url: String,
}

impl VideoRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            embed_url: format!("{EMBED_URL_PREFIX}{id}"),
            watch_url: format!("{WATCH_URL_PREFIX}{id}"),
            title: title.into(),
            id,
        }
    }

    /// The platform's identifier for the video.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// URL suitable for an `<iframe>` player.
    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }

    /// URL of the video's watch page.
    pub fn watch_url(&self) -> &str {
        &self.watch_url
    }
}

impl From<PlaylistEntry> for VideoRecord {
    fn from(entry: PlaylistEntry) -> Self {
        VideoRecord::new(entry.video_id, entry.title)
    }
}

/// One page of a channel's uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageResult {
    /// Videos in the order the platform returned them.
    pub posts: Vec<VideoRecord>,
    /// Whether a following page exists.
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}
