//! Progress observation.
//!
//! The engine emits `(asset, state)` events as it works; reporters render
//! them. Observation only — a reporter must never influence the engine's
//! control flow.

use skiff_core::types::Asset;

/// Per-asset status transition. `Uploading` is the only non-terminal state;
/// every other variant is emitted exactly once per asset per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    Ignored,
    Skipped,
    Uploading,
    Uploaded,
    Error,
}

/// Receives per-asset state transitions in real time.
pub trait ProgressReporter {
    fn asset_state(&mut self, asset: &Asset, state: AssetState);
}

/// Reporter that discards all events. Useful in tests and non-interactive
/// callers.
#[derive(Debug, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn asset_state(&mut self, _asset: &Asset, _state: AssetState) {}
}
