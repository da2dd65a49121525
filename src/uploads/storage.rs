//! Remote object storage boundary.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Destination buckets for uploaded assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageCategory {
    ProfileImages,
    GalleryImages,
    DemoSongs,
}

impl StorageCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageCategory::ProfileImages => "profile-images",
            StorageCategory::GalleryImages => "gallery-images",
            StorageCategory::DemoSongs => "demo-songs",
        }
    }
}

impl fmt::Display for StorageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed upload. Fatal to the submission it belongs to: the coordinator
/// never retries and never returns a partial payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("upload to {category} failed: {message}")]
pub struct UploadError {
    pub category: StorageCategory,
    pub message: String,
}

/// Progress callback, called with (bytes transferred, total bytes).
pub type ProgressFn<'a> = &'a (dyn Fn(u64, u64) + Send + Sync);

/// Remote object storage accepting binary payloads into a destination
/// category.
///
/// Implementations report transfer progress through `on_progress` and
/// resolve to a publicly reachable URL for the stored object. The client
/// is injected into the coordinator, never read from a process-wide
/// handle, so tests and pages supply their own.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        category: StorageCategory,
        payload: &[u8],
        on_progress: ProgressFn<'_>,
    ) -> Result<String, UploadError>;
}
