//! In-memory media server for exercising the traversal without a network.

use super::{
    ApiError, ChannelContent, ChannelNode, ContentKind, ListingEntry, MediaItem, MediaServerApi,
    Resource,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeMediaServer {
    channels: HashMap<String, ChannelNode>,
    content: HashMap<String, ChannelContent>,
    resources: HashMap<String, Vec<Resource>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeMediaServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(mut self, oid: &str, title: &str) -> Self {
        self.channels.insert(
            oid.to_string(),
            ChannelNode {
                oid: oid.to_string(),
                title: title.to_string(),
            },
        );
        self.content.entry(oid.to_string()).or_default();
        self
    }

    /// Registers `child` as a sub-channel of `parent`.
    pub fn sub_channel(mut self, parent: &str, child: &str, title: &str) -> Self {
        self = self.channel(child, title);
        let node = self.channels[child].clone();
        self.content
            .entry(parent.to_string())
            .or_default()
            .channels
            .push(ListingEntry::Valid(node));
        self
    }

    pub fn video(
        mut self,
        channel: &str,
        oid: &str,
        title: &str,
        resources: &[(&str, u64)],
    ) -> Self {
        self.content
            .entry(channel.to_string())
            .or_default()
            .videos
            .push(ListingEntry::Valid(item(oid, title)));
        self.resources.insert(
            oid.to_string(),
            resources
                .iter()
                .map(|(format, size)| Resource {
                    format: format.to_string(),
                    file_size: *size,
                    file: format!("{oid}_{size}.{format}"),
                })
                .collect(),
        );
        self
    }

    pub fn photo_group(mut self, channel: &str, oid: &str, title: &str) -> Self {
        self.content
            .entry(channel.to_string())
            .or_default()
            .photos_groups
            .push(ListingEntry::Valid(item(oid, title)));
        self
    }

    /// Adds a raw entry to the channel's video listing.
    pub fn malformed_video(mut self, channel: &str, raw: serde_json::Value) -> Self {
        self.content
            .entry(channel.to_string())
            .or_default()
            .videos
            .push(ListingEntry::Malformed(raw));
        self
    }

    /// Every request naming `oid` fails.
    pub fn failing(mut self, oid: &str) -> Self {
        self.failing.insert(oid.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String, oid: &str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.contains(oid) {
            return Err(ApiError::Status {
                status: 500,
                message: format!("simulated failure for {oid}"),
            });
        }
        Ok(())
    }
}

fn item(oid: &str, title: &str) -> MediaItem {
    MediaItem {
        oid: oid.to_string(),
        title: title.to_string(),
    }
}

fn not_found(oid: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("{oid} not found"),
    }
}

#[async_trait]
impl MediaServerApi for FakeMediaServer {
    async fn check_server(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn get_channel(&self, oid: &str) -> Result<ChannelNode, ApiError> {
        self.record(format!("get_channel {oid}"), oid)?;
        self.channels.get(oid).cloned().ok_or_else(|| not_found(oid))
    }

    async fn list_channel_content(
        &self,
        parent_oid: &str,
        kinds: &[ContentKind],
    ) -> Result<ChannelContent, ApiError> {
        self.record(format!("content {parent_oid}"), parent_oid)?;
        let mut content = self
            .content
            .get(parent_oid)
            .cloned()
            .ok_or_else(|| not_found(parent_oid))?;
        if !kinds.contains(&ContentKind::Channels) {
            content.channels.clear();
        }
        if !kinds.contains(&ContentKind::Videos) {
            content.videos.clear();
        }
        if !kinds.contains(&ContentKind::PhotoGroups) {
            content.photos_groups.clear();
        }
        Ok(content)
    }

    async fn list_resources(&self, oid: &str) -> Result<Vec<Resource>, ApiError> {
        self.record(format!("resources {oid}"), oid)?;
        self.resources.get(oid).cloned().ok_or_else(|| not_found(oid))
    }

    async fn get_download_url(&self, oid: &str, file: &str) -> Result<String, ApiError> {
        self.record(format!("download {oid}"), oid)?;
        Ok(format!("https://cdn.example.com/{file}"))
    }
}
