//! Skiff core library — domain types, deploy configuration, errors.
//!
//! Public API surface:
//! - [`types`] — [`AssetKey`] and [`Asset`]
//! - [`config`] — `deploy.yaml` loading
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::DeployConfig;
pub use error::ConfigError;
pub use types::{Asset, AssetKey};
