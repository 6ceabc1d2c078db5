use serde::{Deserialize, Serialize};

/// Entity type encoded in the first character of an oid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Channel,
    Video,
    Live,
    PhotoGroup,
    Unknown,
}

impl ObjectKind {
    pub fn from_oid(oid: &str) -> Self {
        match oid.chars().next() {
            Some('c') => ObjectKind::Channel,
            Some('v') => ObjectKind::Video,
            Some('l') => ObjectKind::Live,
            Some('p') => ObjectKind::PhotoGroup,
            _ => ObjectKind::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Channel => "channel",
            ObjectKind::Video => "video",
            ObjectKind::Live => "live",
            ObjectKind::PhotoGroup => "photos",
            ObjectKind::Unknown => "unknown",
        }
    }
}

/// One entry of `download.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLinkRecord {
    pub filename: String,
    pub download_link: String,
}
