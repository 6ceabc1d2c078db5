use super::{types::DownloadLinkRecord, walker::ChannelWalker};
use crate::api::{ApiError, MediaServerApi};
use std::{path::PathBuf, sync::Arc, time::Duration};
use thiserror::Error;
use tracing::info;

pub const OUTPUT_FILE: &str = "download.json";

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Please enter a valid channel oid or check access permissions ({oid})")]
    RootChannel {
        oid: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to encode download links: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct LinkCollector {
    api: Arc<dyn MediaServerApi>,
    walker: ChannelWalker,
    output_path: PathBuf,
}

impl LinkCollector {
    pub fn new(api: Arc<dyn MediaServerApi>, item_delay: Duration, output_path: PathBuf) -> Self {
        Self {
            walker: ChannelWalker::new(api.clone(), item_delay),
            api,
            output_path,
        }
    }

    /// Absolute output path: `requested` joined onto the current directory,
    /// or `download.json` there when nothing was requested.
    pub fn resolve_output_path(requested: Option<PathBuf>) -> std::io::Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        Ok(match requested {
            Some(path) => cwd.join(path),
            None => cwd.join(OUTPUT_FILE),
        })
    }

    /// Walks the channel tree under `root_oid` and writes every resolved link
    /// to the output file. Nothing is written when the root cannot be resolved.
    pub async fn collect(&self, root_oid: &str) -> Result<PathBuf, CollectError> {
        let root = self
            .api
            .get_channel(root_oid)
            .await
            .map_err(|source| CollectError::RootChannel {
                oid: root_oid.to_string(),
                source,
            })?;

        let mut links = Vec::new();
        let summary = self.walker.walk(&root, &mut links).await;
        info!(
            "Walked {} channels: {} items, {} links, {} skipped, {} failed",
            summary.channels, summary.items, summary.links, summary.skipped, summary.failures
        );

        self.write_links(&links).await?;
        info!(
            "Download links gathered successfully and saved to {}",
            self.output_path.display()
        );
        Ok(self.output_path.clone())
    }

    async fn write_links(&self, links: &[DownloadLinkRecord]) -> Result<(), CollectError> {
        let json = serde_json::to_string_pretty(links)?;
        tokio::fs::write(&self.output_path, json)
            .await
            .map_err(|source| CollectError::Write {
                path: self.output_path.clone(),
                source,
            })
    }
}
