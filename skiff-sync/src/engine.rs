//! Sync decision engine.
//!
//! ## Per-asset protocol
//!
//! 1. Ignored assets are reported and dropped — no probe, no read, no upload.
//! 2. Read the full content, compute the local integrity tag ([`crate::etag`]).
//! 3. Probe the remote store. Exact tag match → skip. Absent or differing →
//!    upload with the declared content type and [`CACHE_CONTROL`].
//! 4. Any upload (or local read) failure aborts the run immediately; assets
//!    after it are never probed or uploaded. The partial uploaded-set is
//!    preserved in the returned report.
//!
//! Assets are processed strictly sequentially in enumeration order — the
//! fail-fast policy depends on it.

use skiff_core::types::{Asset, AssetKey};

use crate::error::SyncError;
use crate::etag;
use crate::progress::{AssetState, ProgressReporter};
use crate::store::{ObjectStore, RemoteMetadata};

/// Far-future, immutable-style cache directive for every uploaded object.
/// New content is expected to arrive under new keys; invalidation covers
/// overwritten ones.
pub const CACHE_CONTROL: &str = "max-age=315360000, no-transform, public";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do when a remote probe fails with something other than the
/// provider's "not found" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeFailurePolicy {
    /// Treat the object as absent and force the upload attempt. An uncertain
    /// remote state must never silently skip a needed upload; at worst this
    /// re-uploads redundantly.
    #[default]
    Reupload,
    /// Surface the probe error and stop the run.
    Abort,
}

/// Engine options for a single run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub probe_failure: ProbeFailurePolicy,
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Terminal classification of one asset, emitted exactly once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Ignored,
    Skipped,
    Uploaded,
    Error,
}

/// The failure that aborted a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub key: AssetKey,
    pub message: String,
}

/// Outcome of a full sync run.
///
/// `uploaded` is the finalized uploaded-set for the run — the sole input to
/// the invalidation trigger. When `failure` is set the run aborted early and
/// assets after the failing one have no outcome entry.
#[derive(Debug, Default)]
pub struct SyncRunReport {
    pub outcomes: Vec<(AssetKey, SyncOutcome)>,
    pub uploaded: Vec<AssetKey>,
    pub failure: Option<SyncFailure>,
}

impl SyncRunReport {
    /// True when every processed asset reached a non-error outcome.
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    pub fn count(&self, outcome: SyncOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }
}

// ---------------------------------------------------------------------------
// sync_assets
// ---------------------------------------------------------------------------

/// Run the sync decision engine over `assets`, in order.
///
/// Returns `Ok` with the run report even when the run aborts on an upload
/// failure — the partial uploaded-set matters to the caller. The only `Err`
/// is a probe failure under [`ProbeFailurePolicy::Abort`].
pub async fn sync_assets<S, R>(
    store: &S,
    assets: &[Asset],
    options: &SyncOptions,
    reporter: &mut R,
) -> Result<SyncRunReport, SyncError>
where
    S: ObjectStore + ?Sized,
    R: ProgressReporter + ?Sized,
{
    let mut report = SyncRunReport::default();

    for asset in assets {
        if asset.ignored {
            reporter.asset_state(asset, AssetState::Ignored);
            report.outcomes.push((asset.key.clone(), SyncOutcome::Ignored));
            continue;
        }

        let contents = match std::fs::read(&asset.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                reporter.asset_state(asset, AssetState::Error);
                report.outcomes.push((asset.key.clone(), SyncOutcome::Error));
                report.failure = Some(SyncFailure {
                    key: asset.key.clone(),
                    message: format!("read {}: {err}", asset.path.display()),
                });
                break;
            }
        };

        let local_etag = etag::content_etag(&contents);
        let remote = probe(store, &asset.key, options).await?;

        if remote.etag.as_deref() == Some(local_etag.as_str()) {
            tracing::debug!("skip '{}': remote tag matches", asset.key);
            reporter.asset_state(asset, AssetState::Skipped);
            report.outcomes.push((asset.key.clone(), SyncOutcome::Skipped));
            continue;
        }

        reporter.asset_state(asset, AssetState::Uploading);
        match store
            .put(&asset.key, contents, &asset.content_type, CACHE_CONTROL)
            .await
        {
            Ok(()) => {
                tracing::info!("uploaded '{}'", asset.key);
                reporter.asset_state(asset, AssetState::Uploaded);
                report.outcomes.push((asset.key.clone(), SyncOutcome::Uploaded));
                report.uploaded.push(asset.key.clone());
            }
            Err(err) => {
                tracing::error!("upload failed for '{}': {err}", asset.key);
                reporter.asset_state(asset, AssetState::Error);
                report.outcomes.push((asset.key.clone(), SyncOutcome::Error));
                report.failure = Some(SyncFailure {
                    key: asset.key.clone(),
                    message: err.to_string(),
                });
                break;
            }
        }
    }

    Ok(report)
}

async fn probe<S>(
    store: &S,
    key: &AssetKey,
    options: &SyncOptions,
) -> Result<RemoteMetadata, SyncError>
where
    S: ObjectStore + ?Sized,
{
    match store.head(key).await {
        Ok(meta) => Ok(meta),
        Err(err) => match options.probe_failure {
            ProbeFailurePolicy::Reupload => {
                tracing::warn!("probe failed for '{key}', forcing upload: {err}");
                Ok(RemoteMetadata::absent())
            }
            ProbeFailurePolicy::Abort => Err(SyncError::Probe {
                key: key.clone(),
                source: err,
            }),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
