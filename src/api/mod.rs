mod client;
mod error;
#[cfg(test)]
pub mod testing;
mod types;

pub use client::MediaServerClient;
pub use error::ApiError;
pub use types::{ChannelContent, ChannelNode, ContentKind, ListingEntry, MediaItem, Resource};

use async_trait::async_trait;

/// Calls the traversal needs from the media server.
#[async_trait]
pub trait MediaServerApi: Send + Sync {
    /// Verify the server is reachable and the credentials are accepted
    async fn check_server(&self) -> Result<(), ApiError>;

    async fn get_channel(&self, oid: &str) -> Result<ChannelNode, ApiError>;

    /// List the direct children of a channel, restricted to `kinds`
    async fn list_channel_content(
        &self,
        parent_oid: &str,
        kinds: &[ContentKind],
    ) -> Result<ChannelContent, ApiError>;

    async fn list_resources(&self, oid: &str) -> Result<Vec<Resource>, ApiError>;

    /// Resolve a direct (non-redirecting) download URL for one resource file
    async fn get_download_url(&self, oid: &str, file: &str) -> Result<String, ApiError>;
}
