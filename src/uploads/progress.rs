//! Upload progress broadcasting.
//!
//! Progress is published on a broadcast channel keyed by
//! `(category, index)` so a UI can drive one progress bar per upload with
//! no cross-talk. Within one submission, the published percentages for a
//! key never decrease; nothing is guaranteed between different keys.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::uploads::storage::StorageCategory;

/// One progress observation for a single upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub category: StorageCategory,
    pub index: usize,
    /// Whole percent, 0..=100, rounded to nearest.
    pub percent: u8,
}

/// Broadcasts progress updates to any number of subscribers.
///
/// Keeps the highest percent already published per key and drops
/// observations that would repeat it or move backwards, so subscribers
/// always see a monotonically non-decreasing sequence per key. Sending
/// with no live receivers is not an error.
#[derive(Debug)]
pub struct ProgressBroadcaster {
    tx: broadcast::Sender<ProgressUpdate>,
    published: Mutex<HashMap<(StorageCategory, usize), u8>>,
}

impl ProgressBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self {
            tx,
            published: Mutex::new(HashMap::new()),
        }
    }

    /// New receiver for a subscriber.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressUpdate> {
        self.tx.subscribe()
    }

    /// Records transferred/total bytes for one upload and publishes the
    /// rounded percent if it advances that key.
    ///
    /// Returns true when an update was sent to at least one receiver.
    pub fn report(
        &self,
        category: StorageCategory,
        index: usize,
        transferred: u64,
        total: u64,
    ) -> bool {
        let percent = percent_of(transferred, total);
        let key = (category, index);

        {
            let mut published = self.published.lock().unwrap();
            match published.get(&key) {
                Some(&last) if percent <= last => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        "progress for {}[{}] did not advance ({}% <= {}%), skipped",
                        category,
                        index,
                        percent,
                        last
                    );
                    return false;
                }
                _ => {
                    published.insert(key, percent);
                }
            }
        }

        self.tx
            .send(ProgressUpdate {
                category,
                index,
                percent,
            })
            .is_ok()
    }

    /// Forgets the per-key history. Called at the start of a submission so
    /// a fresh upload for a reused key starts from zero again.
    pub(crate) fn reset(&self) {
        self.published.lock().unwrap().clear();
    }
}

fn percent_of(transferred: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (transferred as f64 / total as f64 * 100.0).round();
    pct.min(100.0) as u8
}
