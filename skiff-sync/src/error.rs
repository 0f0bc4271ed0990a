//! Error types for skiff-sync.

use thiserror::Error;

use skiff_core::types::AssetKey;

use crate::store::StoreError;

/// Run-level errors from the sync engine.
///
/// Per-asset upload failures are not represented here — they abort the run
/// but are carried in the [`crate::SyncRunReport`] so the partial
/// uploaded-set survives. Only the opt-in hard-fail probe policy surfaces
/// as an `Err`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Remote probe failed under [`crate::ProbeFailurePolicy::Abort`].
    #[error("remote probe failed for '{key}': {source}")]
    Probe {
        key: AssetKey,
        #[source]
        source: StoreError,
    },
}
