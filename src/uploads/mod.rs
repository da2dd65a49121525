//! Multi-asset onboarding uploads
//!
//! Selection, preview and bounded accumulation of the onboarding assets
//! (one profile image, up to six gallery images, up to five demo tracks,
//! four external link slots), and the coordinator that uploads them all
//! and merges the results into one payload.

mod preview;
mod slots;

#[cfg(feature = "async")]
mod coordinator;
#[cfg(feature = "async")]
mod progress;
#[cfg(feature = "async")]
mod storage;

pub use preview::{MemoryPreviewStore, PreviewRef, PreviewStore};
pub use slots::{
    DEMO_CAPACITY, EXTERNAL_LINK_SLOTS, FileSlot, GALLERY_CAPACITY, PendingAssets, PendingFile,
};

#[cfg(feature = "async")]
pub use coordinator::{ConsolidatedPayload, UploadCoordinator};
#[cfg(feature = "async")]
pub use progress::{ProgressBroadcaster, ProgressUpdate};
#[cfg(feature = "async")]
pub use storage::{ObjectStorage, ProgressFn, StorageCategory, UploadError};
