//! Deploy configuration — `deploy.yaml`.
//!
//! # File layout
//!
//! ```yaml
//! build_dir: ./build
//! bucket:
//!   name: my-site-bucket
//!   region: us-east-1
//! cdn:
//!   distribution_id: E2ABCDEF012345
//!   region: us-east-1
//! ```
//!
//! AWS credentials are environment-supplied and never appear here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default config filename, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "deploy.yaml";

/// Target object-store bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketConfig {
    pub name: String,
    pub region: String,
}

/// Target CDN distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnConfig {
    pub distribution_id: String,
    pub region: String,
}

/// Root of the deploy configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Local static-site build directory to sync from.
    pub build_dir: PathBuf,
    pub bucket: BucketConfig,
    pub cdn: CdnConfig,
}

/// Load the deploy configuration from an explicit path.
///
/// Returns `ConfigError::ConfigNotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<DeployConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, yaml: &str) -> PathBuf {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, yaml).expect("write config");
        path
    }

    #[test]
    fn load_valid_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            concat!(
                "build_dir: ./build\n",
                "bucket:\n  name: my-bucket\n  region: us-east-1\n",
                "cdn:\n  distribution_id: E2ABC\n  region: us-east-1\n",
            ),
        );

        let config = load_at(&path).expect("load");
        assert_eq!(config.build_dir, PathBuf::from("./build"));
        assert_eq!(config.bucket.name, "my-bucket");
        assert_eq!(config.cdn.distribution_id, "E2ABC");
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = load_at(&tmp.path().join("deploy.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigNotFound { .. }));
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "build_dir: [not: valid\n");
        let err = load_at(&path).unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = DeployConfig {
            build_dir: PathBuf::from("build"),
            bucket: BucketConfig {
                name: "b".to_string(),
                region: "eu-west-1".to_string(),
            },
            cdn: CdnConfig {
                distribution_id: "E1".to_string(),
                region: "us-east-1".to_string(),
            },
        };
        let yaml = serde_yaml::to_string(&config).expect("serialize");
        let back: DeployConfig = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(back, config);
    }
}
