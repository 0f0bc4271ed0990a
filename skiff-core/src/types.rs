//! Domain types for a deploy run.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. Keys, by contrast, are deliberately `String`-backed: they name
//! remote objects and always use forward-slash separators regardless of the
//! local platform.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed remote object key: the asset's path relative to the
/// build directory, forward-slash separated, no leading separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKey(pub String);

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for AssetKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AssetKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single local file staged for sync.
///
/// Content is not buffered here — the sync engine reads from `path` when it
/// actually needs the bytes, so a large build never holds more than one
/// asset's content in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Remote object key derived from the path relative to the build root.
    pub key: AssetKey,
    /// Absolute path to the file on disk.
    pub path: PathBuf,
    /// MIME type, with a `; charset=...` suffix for text-like types.
    pub content_type: String,
    /// Never synced: OS metadata, bundler sidecar files, the build manifest.
    pub ignored: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
