//! Upload coordination: selection state plus the fan-out/fan-in
//! submission that turns pending files into remote references.

use futures::future::{try_join3, try_join_all};
use serde::Serialize;

use crate::uploads::preview::PreviewStore;
use crate::uploads::progress::{ProgressBroadcaster, ProgressUpdate};
use crate::uploads::slots::{FileSlot, PendingAssets};
use crate::uploads::storage::{ObjectStorage, StorageCategory, UploadError};

use tokio::sync::broadcast;

const PROGRESS_CHANNEL_CAPACITY: usize = 256;

/// Remote references produced by a completed submission, ready to merge
/// into the profile update.
///
/// Gallery and demo references keep the order of their pending lists;
/// external links keep slot order with empty slots filtered out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsolidatedPayload {
    pub profile_image_ref: Option<String>,
    pub gallery_refs: Vec<String>,
    pub demo_refs: Vec<String>,
    pub external_links: Vec<String>,
}

/// Coordinates onboarding assets from selection through upload.
///
/// The storage client and preview store are injected; the coordinator
/// owns its pending state exclusively and two coordinator instances share
/// nothing.
pub struct UploadCoordinator<S, P: PreviewStore> {
    storage: S,
    assets: PendingAssets<P>,
    progress: ProgressBroadcaster,
}

impl<S: ObjectStorage, P: PreviewStore> UploadCoordinator<S, P> {
    pub fn new(storage: S, previews: P) -> Self {
        Self {
            storage,
            assets: PendingAssets::new(previews),
            progress: ProgressBroadcaster::new(PROGRESS_CHANNEL_CAPACITY),
        }
    }

    /// See [`PendingAssets::select_files`].
    pub fn select_files(&mut self, slot: FileSlot, incoming: Vec<Vec<u8>>) -> usize {
        self.assets.select_files(slot, incoming)
    }

    /// See [`PendingAssets::remove_file`].
    pub fn remove_file(&mut self, slot: FileSlot, index: usize) {
        self.assets.remove_file(slot, index)
    }

    /// See [`PendingAssets::set_external_link`].
    pub fn set_external_link(&mut self, index: usize, value: impl Into<String>) {
        self.assets.set_external_link(index, value)
    }

    /// See [`PendingAssets::clear_external_link`].
    pub fn clear_external_link(&mut self, index: usize) {
        self.assets.clear_external_link(index)
    }

    pub fn assets(&self) -> &PendingAssets<P> {
        &self.assets
    }

    /// Progress receiver keyed by `(category, index)`; see
    /// [`ProgressBroadcaster`].
    pub fn subscribe_progress(&self) -> broadcast::Receiver<ProgressUpdate> {
        self.progress.subscribe()
    }

    /// Uploads every pending file and merges the results into one payload.
    ///
    /// All uploads are started without waiting on each other and joined as
    /// a unit: the first failure fails the whole call and no partial
    /// payload is ever returned. Assets that finished uploading before the
    /// failure are not deleted - there is no compensating cleanup - and
    /// the pending files stay queued so the caller may retry.
    ///
    /// On success the pending files are consumed and their previews
    /// released; the external link slots are left as entered. In-flight
    /// uploads cannot be aborted once this is called.
    pub async fn submit(&mut self) -> Result<ConsolidatedPayload, UploadError> {
        self.progress.reset();

        let payload = {
            let assets = &self.assets;
            let storage = &self.storage;
            let progress = &self.progress;

            let profile = async move {
                match assets.profile_image() {
                    Some(file) => {
                        let on_progress = move |transferred, total| {
                            progress.report(StorageCategory::ProfileImages, 0, transferred, total);
                        };
                        storage
                            .upload(StorageCategory::ProfileImages, file.bytes(), &on_progress)
                            .await
                            .map(Some)
                    }
                    None => Ok(None),
                }
            };

            let gallery = try_join_all(assets.gallery().iter().enumerate().map(
                |(index, file)| async move {
                    let on_progress = move |transferred, total| {
                        progress.report(StorageCategory::GalleryImages, index, transferred, total);
                    };
                    storage
                        .upload(StorageCategory::GalleryImages, file.bytes(), &on_progress)
                        .await
                },
            ));

            let demos = try_join_all(assets.demo_tracks().iter().enumerate().map(
                |(index, file)| async move {
                    let on_progress = move |transferred, total| {
                        progress.report(StorageCategory::DemoSongs, index, transferred, total);
                    };
                    storage
                        .upload(StorageCategory::DemoSongs, file.bytes(), &on_progress)
                        .await
                },
            ));

            let (profile_image_ref, gallery_refs, demo_refs) =
                try_join3(profile, gallery, demos).await?;

            ConsolidatedPayload {
                profile_image_ref,
                gallery_refs,
                demo_refs,
                external_links: assets.filled_links(),
            }
        };

        #[cfg(feature = "tracing")]
        tracing::info!(
            "submission complete: {} gallery, {} demo uploads",
            payload.gallery_refs.len(),
            payload.demo_refs.len()
        );

        self.assets.clear_files();
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uploads::preview::MemoryPreviewStore;
    use crate::uploads::storage::ProgressFn;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Storage double: uploads resolve to a URL naming the category and the
    /// payload's first byte, with staged progress along the way.
    struct FakeStorage {
        fail_category: Option<StorageCategory>,
        upload_count: AtomicUsize,
    }

    impl FakeStorage {
        fn new() -> Self {
            Self {
                fail_category: None,
                upload_count: AtomicUsize::new(0),
            }
        }

        fn failing(category: StorageCategory) -> Self {
            Self {
                fail_category: Some(category),
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl ObjectStorage for FakeStorage {
        async fn upload(
            &self,
            category: StorageCategory,
            payload: &[u8],
            on_progress: ProgressFn<'_>,
        ) -> Result<String, UploadError> {
            let total = payload.len() as u64;
            on_progress(0, total);
            on_progress(total / 2, total);
            on_progress(total, total);

            if self.fail_category == Some(category) {
                return Err(UploadError {
                    category,
                    message: "bucket unreachable".into(),
                });
            }

            self.upload_count.fetch_add(1, Ordering::SeqCst);
            let tag = payload.first().copied().unwrap_or(0);
            Ok(format!("https://assets.example/{category}/{tag}"))
        }
    }

    fn coordinator(storage: FakeStorage) -> UploadCoordinator<FakeStorage, MemoryPreviewStore> {
        UploadCoordinator::new(storage, MemoryPreviewStore::new())
    }

    fn files(tags: &[u8]) -> Vec<Vec<u8>> {
        tags.iter().map(|&t| vec![t, 0, 0, 0]).collect()
    }

    #[tokio::test]
    async fn test_submit_merges_all_slots_in_order() {
        let mut coordinator = coordinator(FakeStorage::new());
        coordinator.select_files(FileSlot::ProfileImage, files(&[9]));
        coordinator.select_files(FileSlot::GalleryImage, files(&[1, 2, 3]));
        coordinator.select_files(FileSlot::DemoTrack, files(&[7, 8]));
        coordinator.set_external_link(0, "https://soundcloud.com/artist");
        coordinator.set_external_link(2, "https://youtube.com/artist");

        let payload = coordinator.submit().await.expect("submit should succeed");

        assert_eq!(
            payload.profile_image_ref.as_deref(),
            Some("https://assets.example/profile-images/9")
        );
        assert_eq!(
            payload.gallery_refs,
            vec![
                "https://assets.example/gallery-images/1",
                "https://assets.example/gallery-images/2",
                "https://assets.example/gallery-images/3",
            ]
        );
        assert_eq!(
            payload.demo_refs,
            vec![
                "https://assets.example/demo-songs/7",
                "https://assets.example/demo-songs/8",
            ]
        );
        assert_eq!(
            payload.external_links,
            vec!["https://soundcloud.com/artist", "https://youtube.com/artist"]
        );
        assert_eq!(coordinator.storage.upload_count.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_submit_without_pending_files() {
        let mut coordinator = coordinator(FakeStorage::new());
        coordinator.set_external_link(1, "https://bandcamp.com/artist");

        let payload = coordinator.submit().await.expect("submit should succeed");

        assert_eq!(payload.profile_image_ref, None);
        assert!(payload.gallery_refs.is_empty());
        assert!(payload.demo_refs.is_empty());
        assert_eq!(payload.external_links, vec!["https://bandcamp.com/artist"]);
    }

    #[tokio::test]
    async fn test_submit_fails_as_a_unit() {
        let mut coordinator = coordinator(FakeStorage::failing(StorageCategory::DemoSongs));
        coordinator.select_files(FileSlot::ProfileImage, files(&[9]));
        coordinator.select_files(FileSlot::GalleryImage, files(&[1, 2, 3]));
        coordinator.select_files(FileSlot::DemoTrack, files(&[7]));

        let err = coordinator.submit().await.expect_err("submit should fail");

        assert_eq!(err.category, StorageCategory::DemoSongs);
        // No partial payload: pending state is untouched so the caller can
        // retry, previews included.
        assert_eq!(coordinator.assets().pending_count(FileSlot::ProfileImage), 1);
        assert_eq!(coordinator.assets().pending_count(FileSlot::GalleryImage), 3);
        assert_eq!(coordinator.assets().pending_count(FileSlot::DemoTrack), 1);
        assert_eq!(coordinator.assets().previews().live_count(), 4);
    }

    #[tokio::test]
    async fn test_submit_success_consumes_pending_files() {
        let mut coordinator = coordinator(FakeStorage::new());
        coordinator.select_files(FileSlot::ProfileImage, files(&[9]));
        coordinator.select_files(FileSlot::GalleryImage, files(&[1, 2]));
        coordinator.set_external_link(0, "https://example.com");

        coordinator.submit().await.expect("submit should succeed");

        assert_eq!(coordinator.assets().pending_count(FileSlot::ProfileImage), 0);
        assert_eq!(coordinator.assets().pending_count(FileSlot::GalleryImage), 0);
        assert_eq!(coordinator.assets().previews().live_count(), 0);
        // Links are form fields, not uploads; they stay as entered.
        assert_eq!(coordinator.assets().filled_links(), vec!["https://example.com"]);
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_per_key() {
        let mut coordinator = coordinator(FakeStorage::new());
        coordinator.select_files(FileSlot::GalleryImage, files(&[1, 2, 3]));
        let mut rx = coordinator.subscribe_progress();

        coordinator.submit().await.expect("submit should succeed");

        let mut by_key: std::collections::HashMap<(StorageCategory, usize), Vec<u8>> =
            std::collections::HashMap::new();
        while let Ok(update) = rx.try_recv() {
            by_key
                .entry((update.category, update.index))
                .or_default()
                .push(update.percent);
        }

        let key = (StorageCategory::GalleryImages, 1);
        let percents = by_key.get(&key).expect("updates for gallery index 1");
        assert!(
            percents.windows(2).all(|w| w[0] <= w[1]),
            "progress went backwards: {percents:?}"
        );
        assert_eq!(*percents.last().unwrap(), 100);
        assert_eq!(by_key.len(), 3);
    }

    #[tokio::test]
    async fn test_resubmission_resets_progress_history() {
        let mut coordinator = coordinator(FakeStorage::new());
        coordinator.select_files(FileSlot::GalleryImage, files(&[1]));
        coordinator.submit().await.expect("first submit");

        coordinator.select_files(FileSlot::GalleryImage, files(&[2]));
        let mut rx = coordinator.subscribe_progress();
        coordinator.submit().await.expect("second submit");

        let percents: Vec<u8> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|u| u.percent)
            .collect();
        // The reused (gallery-images, 0) key starts over from zero.
        assert_eq!(percents, vec![0, 50, 100]);
    }
}
