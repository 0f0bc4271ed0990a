//! Invalidation trigger.
//!
//! Runs after the upload phase with that run's finalized uploaded-set. An
//! empty set makes no remote call at all. Invalidation is independent of the
//! uploads: a failure here never rolls anything back — the CDN just serves
//! stale copies until they expire or a later run succeeds.

use skiff_core::types::AssetKey;

use crate::store::{CdnError, CdnInvalidator};

/// Public-facing path for an uploaded key: the key behind the distribution
/// root separator.
pub fn public_path(key: &AssetKey) -> String {
    format!("/{key}")
}

/// Request eviction of the uploaded keys' cached copies.
///
/// Returns `Ok(None)` when `uploaded` is empty (invalidation skipped,
/// no remote call), `Ok(Some(id))` with the provider's invalidation
/// identifier otherwise. `caller_reference` must be unique per invocation;
/// the provider uses it for deduplication only.
pub async fn invalidate_uploaded<C>(
    cdn: &C,
    uploaded: &[AssetKey],
    caller_reference: &str,
) -> Result<Option<String>, CdnError>
where
    C: CdnInvalidator + ?Sized,
{
    if uploaded.is_empty() {
        tracing::debug!("no uploads this run; skipping invalidation");
        return Ok(None);
    }

    let paths: Vec<String> = uploaded.iter().map(public_path).collect();
    let id = cdn.create_invalidation(&paths, caller_reference).await?;
    tracing::info!("invalidation created: {id}");
    Ok(Some(id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    #[derive(Default)]
    struct FakeCdn {
        fail: bool,
        requests: Mutex<Vec<(Vec<String>, String)>>,
    }

    #[async_trait]
    impl CdnInvalidator for FakeCdn {
        async fn create_invalidation(
            &self,
            paths: &[String],
            caller_reference: &str,
        ) -> Result<String, CdnError> {
            self.requests
                .lock()
                .unwrap()
                .push((paths.to_vec(), caller_reference.to_string()));
            if self.fail {
                return Err(CdnError::service("simulated invalidation outage"));
            }
            Ok("INV123".to_string())
        }
    }

    #[tokio::test]
    async fn empty_uploaded_set_makes_no_remote_call() {
        let cdn = FakeCdn::default();
        let result = invalidate_uploaded(&cdn, &[], "ref-1").await.expect("ok");
        assert_eq!(result, None);
        assert!(cdn.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn uploaded_keys_become_slash_prefixed_public_paths() {
        let cdn = FakeCdn::default();
        let uploaded = vec![
            AssetKey::from("app.js"),
            AssetKey::from("static/media/logo.png"),
        ];

        let id = invalidate_uploaded(&cdn, &uploaded, "1700000000000")
            .await
            .expect("ok");
        assert_eq!(id, Some("INV123".to_string()));

        let requests = cdn.requests.lock().unwrap();
        assert_eq!(requests.len(), 1, "exactly one invalidation per run");
        let (paths, reference) = &requests[0];
        assert_eq!(paths, &vec!["/app.js".to_string(), "/static/media/logo.png".to_string()]);
        assert_eq!(reference, "1700000000000");
    }

    #[tokio::test]
    async fn provider_failure_propagates_without_retry() {
        let cdn = FakeCdn {
            fail: true,
            ..FakeCdn::default()
        };
        let uploaded = vec![AssetKey::from("index.html")];
        let err = invalidate_uploaded(&cdn, &uploaded, "ref-2")
            .await
            .expect_err("failure must surface");
        assert!(matches!(err, CdnError::Service { .. }));
        assert_eq!(cdn.requests.lock().unwrap().len(), 1, "no retry");
    }
}
