//! Integrity tag computation.
//!
//! S3 tags a simple (non-multipart) PutObject with the MD5 digest of the
//! body, hex-encoded and wrapped in double quotes. Computing the same tag
//! locally lets a HeadObject comparison decide staleness without
//! transferring content.

use md5::{Digest, Md5};

/// Compute the store-convention integrity tag for `content`:
/// a double-quoted lowercase hex MD5 digest.
pub fn content_etag(content: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(content);
    format!("\"{}\"", hex::encode(hasher.finalize()))
}
