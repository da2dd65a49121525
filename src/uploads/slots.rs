//! Pending asset slots for the onboarding form.
//!
//! All mutation of the selected-but-not-yet-uploaded state goes through
//! here so the capacity rules and the file/preview pairing hold in one
//! place.

use crate::uploads::preview::{PreviewRef, PreviewStore};

pub const GALLERY_CAPACITY: usize = 6;
pub const DEMO_CAPACITY: usize = 5;
pub const EXTERNAL_LINK_SLOTS: usize = 4;

/// File-backed slot kinds. External links are plain strings and live in
/// their own fixed slots, see [`PendingAssets::set_external_link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileSlot {
    ProfileImage,
    GalleryImage,
    DemoTrack,
}

impl FileSlot {
    /// Maximum number of pending files the slot holds.
    pub fn capacity(self) -> usize {
        match self {
            FileSlot::ProfileImage => 1,
            FileSlot::GalleryImage => GALLERY_CAPACITY,
            FileSlot::DemoTrack => DEMO_CAPACITY,
        }
    }

    /// Image kinds get a local preview; audio does not.
    fn has_preview(self) -> bool {
        matches!(self, FileSlot::ProfileImage | FileSlot::GalleryImage)
    }
}

/// A locally selected file waiting for upload, paired with its preview
/// when the slot kind has one.
#[derive(Debug)]
pub struct PendingFile {
    bytes: Vec<u8>,
    preview: Option<PreviewRef>,
}

impl PendingFile {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn preview(&self) -> Option<&PreviewRef> {
        self.preview.as_ref()
    }
}

/// All pending onboarding assets.
///
/// Owns the selected files and their previews exclusively until they are
/// submitted or removed. Previews are released on removal, on
/// profile-image overwrite, and on drop.
#[derive(Debug)]
pub struct PendingAssets<P: PreviewStore> {
    previews: P,
    profile_image: Option<PendingFile>,
    gallery: Vec<PendingFile>,
    demos: Vec<PendingFile>,
    links: [String; EXTERNAL_LINK_SLOTS],
}

impl<P: PreviewStore> PendingAssets<P> {
    pub fn new(previews: P) -> Self {
        Self {
            previews,
            profile_image: None,
            gallery: Vec::new(),
            demos: Vec::new(),
            links: Default::default(),
        }
    }

    /// Queues incoming files for the given slot and returns how many were
    /// actually accepted.
    ///
    /// `ProfileImage` holds one file, last write wins: any prior pending
    /// file is replaced and its preview released. The bounded slots append
    /// in the order received until full; the rest of the batch is dropped
    /// silently - over-selection is not an error, but the return value
    /// lets callers surface an "N files dropped" hint.
    pub fn select_files(&mut self, slot: FileSlot, incoming: Vec<Vec<u8>>) -> usize {
        match slot {
            FileSlot::ProfileImage => {
                let Some(bytes) = incoming.into_iter().next_back() else {
                    return 0;
                };
                if let Some(prior) = self.profile_image.take() {
                    release(&mut self.previews, prior);
                }
                let preview = Some(self.previews.create(&bytes));
                self.profile_image = Some(PendingFile { bytes, preview });
                1
            }
            FileSlot::GalleryImage | FileSlot::DemoTrack => {
                let has_preview = slot.has_preview();
                let list = match slot {
                    FileSlot::GalleryImage => &mut self.gallery,
                    _ => &mut self.demos,
                };
                let remaining = slot.capacity().saturating_sub(list.len());
                let accepted = incoming.len().min(remaining);

                for bytes in incoming.into_iter().take(accepted) {
                    let preview = if has_preview {
                        Some(self.previews.create(&bytes))
                    } else {
                        None
                    };
                    list.push(PendingFile { bytes, preview });
                }
                accepted
            }
        }
    }

    /// Removes the pending file at `index` along with its paired preview.
    ///
    /// Out-of-range indices are a silent no-op. Remaining files keep their
    /// relative order.
    pub fn remove_file(&mut self, slot: FileSlot, index: usize) {
        match slot {
            FileSlot::ProfileImage => {
                if index == 0 {
                    if let Some(file) = self.profile_image.take() {
                        release(&mut self.previews, file);
                    }
                }
            }
            FileSlot::GalleryImage => {
                if index < self.gallery.len() {
                    let file = self.gallery.remove(index);
                    release(&mut self.previews, file);
                }
            }
            FileSlot::DemoTrack => {
                if index < self.demos.len() {
                    let file = self.demos.remove(index);
                    release(&mut self.previews, file);
                }
            }
        }
    }

    /// Overwrites the external link at `index` in place. There are always
    /// exactly four link slots; indices outside them are a silent no-op.
    pub fn set_external_link(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.links.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Resets the link at `index` back to empty. The slot count never
    /// changes.
    pub fn clear_external_link(&mut self, index: usize) {
        self.set_external_link(index, String::new());
    }

    pub fn profile_image(&self) -> Option<&PendingFile> {
        self.profile_image.as_ref()
    }

    pub fn gallery(&self) -> &[PendingFile] {
        &self.gallery
    }

    pub fn demo_tracks(&self) -> &[PendingFile] {
        &self.demos
    }

    pub fn external_links(&self) -> &[String] {
        &self.links
    }

    /// Non-empty links in slot order.
    pub fn filled_links(&self) -> Vec<String> {
        self.links
            .iter()
            .filter(|link| !link.is_empty())
            .cloned()
            .collect()
    }

    pub fn pending_count(&self, slot: FileSlot) -> usize {
        match slot {
            FileSlot::ProfileImage => usize::from(self.profile_image.is_some()),
            FileSlot::GalleryImage => self.gallery.len(),
            FileSlot::DemoTrack => self.demos.len(),
        }
    }

    pub fn previews(&self) -> &P {
        &self.previews
    }

    /// Consumes every pending file and releases its preview. Called after
    /// a successful submission, when the bytes are already uploaded.
    pub(crate) fn clear_files(&mut self) {
        if let Some(file) = self.profile_image.take() {
            release(&mut self.previews, file);
        }
        for file in self.gallery.drain(..) {
            release(&mut self.previews, file);
        }
        for file in self.demos.drain(..) {
            release(&mut self.previews, file);
        }
    }
}

impl<P: PreviewStore> Drop for PendingAssets<P> {
    fn drop(&mut self) {
        self.clear_files();
    }
}

fn release<P: PreviewStore>(previews: &mut P, file: PendingFile) {
    if let Some(preview) = file.preview {
        previews.revoke(&preview);
    }
}
