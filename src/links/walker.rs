use super::{
    selector::ResourceSelector,
    types::{DownloadLinkRecord, ObjectKind},
};
use crate::api::{
    ApiError, ChannelNode, ContentKind, ListingEntry, MediaItem, MediaServerApi,
};
use crate::utils::describe_item;
use std::{future::Future, pin::Pin, sync::Arc, time::Duration};
use tracing::{debug, error, info};

const CONTENT_KINDS: [ContentKind; 3] = [
    ContentKind::Channels,
    ContentKind::Videos,
    ContentKind::PhotoGroups,
];

type VisitFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Counters gathered over one walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    pub channels: usize,
    pub items: usize,
    pub links: usize,
    pub skipped: usize,
    pub failures: usize,
}

pub struct ChannelWalker {
    api: Arc<dyn MediaServerApi>,
    selector: ResourceSelector,
    item_delay: Duration,
}

impl ChannelWalker {
    pub fn new(api: Arc<dyn MediaServerApi>, item_delay: Duration) -> Self {
        Self {
            selector: ResourceSelector::new(api.clone()),
            api,
            item_delay,
        }
    }

    /// Depth-first walk: every sub-channel is visited before the channel's own
    /// items. Records are appended to `links` in traversal order.
    pub async fn walk(
        &self,
        channel: &ChannelNode,
        links: &mut Vec<DownloadLinkRecord>,
    ) -> WalkSummary {
        let mut summary = WalkSummary::default();
        self.visit(channel, links, &mut summary).await;
        summary
    }

    fn visit<'a>(
        &'a self,
        channel: &'a ChannelNode,
        links: &'a mut Vec<DownloadLinkRecord>,
        summary: &'a mut WalkSummary,
    ) -> VisitFuture<'a> {
        Box::pin(async move {
            info!("Processing channel: {} - {}", channel.oid, channel.title);
            summary.channels += 1;

            let content = match self
                .api
                .list_channel_content(&channel.oid, &CONTENT_KINDS)
                .await
            {
                Ok(content) => content,
                Err(e) => {
                    error!("Failed to list content of channel {}: {}", channel.oid, e);
                    summary.failures += 1;
                    return;
                }
            };

            for child in &content.channels {
                match child {
                    ListingEntry::Valid(child) => self.visit(child, links, summary).await,
                    ListingEntry::Malformed(raw) => {
                        error!("Skipping malformed sub-channel of {}: {}", channel.oid, raw);
                        summary.failures += 1;
                    }
                }
            }

            let items: Vec<&ListingEntry<MediaItem>> = content
                .videos
                .iter()
                .chain(content.photos_groups.iter())
                .collect();
            let total = items.len();

            for (index, entry) in items.into_iter().enumerate() {
                let item = match entry {
                    ListingEntry::Valid(item) => item,
                    ListingEntry::Malformed(raw) => {
                        error!(
                            "Error retrieving link for item {}/{}: malformed entry {}",
                            index + 1,
                            total,
                            raw
                        );
                        summary.items += 1;
                        summary.failures += 1;
                        self.pace().await;
                        continue;
                    }
                };

                let kind = ObjectKind::from_oid(&item.oid);
                info!(
                    "Processing item {}/{}: {}",
                    index + 1,
                    total,
                    describe_item(kind.label(), &item.oid, &item.title)
                );
                summary.items += 1;

                match self.process_item(kind, item).await {
                    Ok(Some(record)) => {
                        links.push(record);
                        summary.links += 1;
                    }
                    Ok(None) => summary.skipped += 1,
                    Err(e) => {
                        error!("Error retrieving link for {}: {}", item.oid, e);
                        summary.failures += 1;
                    }
                }

                self.pace().await;
            }
        })
    }

    async fn pace(&self) {
        if !self.item_delay.is_zero() {
            tokio::time::sleep(self.item_delay).await;
        }
    }

    async fn process_item(
        &self,
        kind: ObjectKind,
        item: &MediaItem,
    ) -> Result<Option<DownloadLinkRecord>, ApiError> {
        match kind {
            ObjectKind::Video => self.selector.resolve(item).await,
            _ => {
                debug!("Skipping {} item {}", kind.label(), item.oid);
                Ok(None)
            }
        }
    }
}
