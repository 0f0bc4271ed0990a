//! AWS implementations of the skiff-sync collaborator traits.
//!
//! - [`S3Store`] — `ObjectStore` over `aws-sdk-s3` (HeadObject / PutObject)
//! - [`CloudFrontCdn`] — `CdnInvalidator` over `aws-sdk-cloudfront`
//!
//! Credentials come from the standard AWS environment/profile chain via
//! `aws-config`; only region and resource identifiers are passed in.

pub mod cloudfront;
pub mod s3;

pub use cloudfront::CloudFrontCdn;
pub use s3::S3Store;
