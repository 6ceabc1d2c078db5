use super::types::DownloadLinkRecord;
use crate::api::{ApiError, MediaItem, MediaServerApi, Resource};
use crate::utils::format_number;
use std::sync::Arc;
use tracing::debug;

/// Adaptive streaming playlists cannot be fetched as a single file.
pub const MANIFEST_FORMAT: &str = "m3u8";

/// Largest non-manifest resource; on equal sizes the earliest entry wins.
pub fn select_resource(resources: &[Resource]) -> Option<&Resource> {
    resources
        .iter()
        .filter(|r| r.format != MANIFEST_FORMAT)
        .fold(None, |best: Option<&Resource>, r| match best {
            Some(b) if b.file_size >= r.file_size => Some(b),
            _ => Some(r),
        })
}

pub struct ResourceSelector {
    api: Arc<dyn MediaServerApi>,
}

impl ResourceSelector {
    pub fn new(api: Arc<dyn MediaServerApi>) -> Self {
        Self { api }
    }

    /// Resolves a download link for a video item. Callers filter out
    /// non-video items beforehand.
    pub async fn resolve(&self, item: &MediaItem) -> Result<Option<DownloadLinkRecord>, ApiError> {
        let resources = self.api.list_resources(&item.oid).await?;

        let Some(resource) = select_resource(&resources) else {
            debug!(
                "No downloadable resource for {} among {} entries",
                item.oid,
                resources.len()
            );
            return Ok(None);
        };

        debug!(
            "Selected {} resource of {} bytes for {}",
            resource.format,
            format_number(resource.file_size),
            item.oid
        );

        let url = self.api.get_download_url(&item.oid, &resource.file).await?;

        Ok(Some(DownloadLinkRecord {
            filename: item.title.clone(),
            download_link: url,
        }))
    }
}
