//! Collaborator traits for the remote object store and the CDN.
//!
//! The engine is written against these traits; `skiff-aws` provides the
//! production implementations and tests use in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;

use skiff_core::types::AssetKey;

// ---------------------------------------------------------------------------
// Remote metadata
// ---------------------------------------------------------------------------

/// Metadata for the object currently stored at a key.
///
/// `etag: None` means no object exists at that key. Fetched on demand,
/// never cached across assets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteMetadata {
    pub etag: Option<String>,
}

impl RemoteMetadata {
    /// No object at this key.
    pub fn absent() -> Self {
        Self { etag: None }
    }

    pub fn with_etag(etag: impl Into<String>) -> Self {
        Self {
            etag: Some(etag.into()),
        }
    }

    pub fn exists(&self) -> bool {
        self.etag.is_some()
    }
}

// ---------------------------------------------------------------------------
// Object store
// ---------------------------------------------------------------------------

/// Errors from remote store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("remote store request failed: {message}")]
    Service { message: String },
}

impl StoreError {
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }
}

/// Remote object store: metadata probe and upload.
///
/// Implementations must map the provider's "not found" signal to
/// `Ok(RemoteMetadata::absent())` — a missing object is a normal, expected
/// probe result, not an error. `Err` is reserved for everything else; the
/// engine decides whether that soft-fails toward re-upload or aborts.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the integrity tag of the object at `key`, if one exists.
    async fn head(&self, key: &AssetKey) -> Result<RemoteMetadata, StoreError>;

    /// Write `body` to `key` with the declared content type and
    /// cache-control directive.
    async fn put(
        &self,
        key: &AssetKey,
        body: Vec<u8>,
        content_type: &str,
        cache_control: &str,
    ) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// CDN
// ---------------------------------------------------------------------------

/// Errors from CDN invalidation.
#[derive(Debug, Error)]
pub enum CdnError {
    #[error("invalidation request failed: {message}")]
    Service { message: String },

    /// The provider accepted the request but returned no invalidation id.
    #[error("invalidation created but response carried no identifier")]
    MissingId,
}

impl CdnError {
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }
}

/// CDN provider: evict cached copies at the given public paths.
#[async_trait]
pub trait CdnInvalidator: Send + Sync {
    /// Request invalidation for `paths` (public-facing, `/`-prefixed).
    /// `caller_reference` is a per-invocation token the provider uses for
    /// request deduplication; it carries no correctness requirement here.
    ///
    /// Returns the provider's invalidation identifier.
    async fn create_invalidation(
        &self,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<String, CdnError>;
}
