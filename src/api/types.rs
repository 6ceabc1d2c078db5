use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content kinds accepted by `channels/content/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Channels,
    Videos,
    PhotoGroups,
}

impl ContentKind {
    pub fn code(self) -> char {
        match self {
            ContentKind::Channels => 'c',
            ContentKind::Videos => 'v',
            ContentKind::PhotoGroups => 'p',
        }
    }

    pub fn query_value(kinds: &[ContentKind]) -> String {
        kinds.iter().map(|k| k.code()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelNode {
    pub oid: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub oid: String,
    #[serde(default)]
    pub title: String,
}

/// A listing entry that either matches the expected shape or is kept raw so
/// one bad entry does not fail the whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingEntry<T> {
    Valid(T),
    Malformed(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelContent {
    #[serde(default)]
    pub channels: Vec<ListingEntry<ChannelNode>>,
    #[serde(default)]
    pub videos: Vec<ListingEntry<MediaItem>>,
    #[serde(default)]
    pub photos_groups: Vec<ListingEntry<MediaItem>>,
}

/// One encoded rendition of a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub format: String,
    pub file_size: u64,
    pub file: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelResponse {
    pub info: ChannelNode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResourcesResponse {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DownloadUrlResponse {
    pub url: String,
}
