//! S3-backed object store.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;

use skiff_core::types::AssetKey;
use skiff_sync::{ObjectStore, RemoteMetadata, StoreError};

/// Object store backed by an S3 bucket.
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Build a client for `bucket` in `region` from the ambient AWS
    /// credential chain.
    pub async fn new(region: &str, bucket: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: Client::new(&config),
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn head(&self, key: &AssetKey) -> Result<RemoteMetadata, StoreError> {
        let result = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&key.0)
            .send()
            .await;

        match result {
            Ok(head) => Ok(RemoteMetadata {
                etag: head.e_tag().map(str::to_string),
            }),
            Err(err) => {
                // A missing object is a normal probe result, not an error.
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                {
                    return Ok(RemoteMetadata::absent());
                }
                tracing::warn!("HeadObject failed for '{key}'");
                Err(StoreError::service(
                    DisplayErrorContext(&err).to_string(),
                ))
            }
        }
    }

    async fn put(
        &self,
        key: &AssetKey,
        body: Vec<u8>,
        content_type: &str,
        cache_control: &str,
    ) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key.0)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .cache_control(cache_control)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|err| StoreError::service(DisplayErrorContext(&err).to_string()))?;
        Ok(())
    }
}
