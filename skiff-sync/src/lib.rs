//! # skiff-sync
//!
//! ETag-gated sync decision engine and invalidation trigger.
//!
//! Call [`sync_assets`] to classify and upload every enumerated asset
//! against an [`ObjectStore`], then [`invalidate_uploaded`] with the run's
//! uploaded-set. The remote store is the source of truth for "what's already
//! there"; no local state persists between runs.

pub mod engine;
pub mod error;
pub mod etag;
pub mod invalidation;
pub mod progress;
pub mod store;

pub use engine::{
    sync_assets, ProbeFailurePolicy, SyncFailure, SyncOptions, SyncOutcome, SyncRunReport,
    CACHE_CONTROL,
};
pub use error::SyncError;
pub use invalidation::{invalidate_uploaded, public_path};
pub use progress::{AssetState, NullReporter, ProgressReporter};
pub use store::{CdnError, CdnInvalidator, ObjectStore, RemoteMetadata, StoreError};
