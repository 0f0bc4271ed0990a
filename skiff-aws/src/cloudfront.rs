//! CloudFront-backed CDN invalidator.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudfront::error::DisplayErrorContext;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
use aws_sdk_cloudfront::Client;

use skiff_sync::{CdnError, CdnInvalidator};

/// CDN invalidator backed by a CloudFront distribution.
pub struct CloudFrontCdn {
    client: Client,
    distribution_id: String,
}

impl CloudFrontCdn {
    /// Build a client for `distribution_id` from the ambient AWS
    /// credential chain.
    pub async fn new(region: &str, distribution_id: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: Client::new(&config),
            distribution_id: distribution_id.to_string(),
        }
    }
}

#[async_trait]
impl CdnInvalidator for CloudFrontCdn {
    async fn create_invalidation(
        &self,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<String, CdnError> {
        let path_list = Paths::builder()
            .quantity(paths.len() as i32)
            .set_items(Some(paths.to_vec()))
            .build()
            .map_err(|e| CdnError::service(e.to_string()))?;
        let batch = InvalidationBatch::builder()
            .paths(path_list)
            .caller_reference(caller_reference)
            .build()
            .map_err(|e| CdnError::service(e.to_string()))?;

        let response = self
            .client
            .create_invalidation()
            .distribution_id(&self.distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|err| CdnError::service(DisplayErrorContext(&err).to_string()))?;

        let invalidation = response.invalidation().ok_or(CdnError::MissingId)?;
        tracing::debug!("invalidation {} accepted", invalidation.id());
        Ok(invalidation.id().to_string())
    }
}
