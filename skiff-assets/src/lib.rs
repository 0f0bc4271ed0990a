//! Asset enumeration for `skiff-assets`.
//!
//! `enumerate(build_dir)` walks a static-site build directory and returns one
//! [`Asset`] per regular file: a forward-slash remote key, a MIME content
//! type (with charset suffix for text-like types), and an ignore flag for
//! files that must never be deployed. Traversal is depth-first with entries
//! sorted by name, so enumeration order is stable across runs.

use std::fs;
use std::path::{Path, PathBuf};

use mime_guess::mime::{self, Mime};
use thiserror::Error;

use skiff_core::types::{Asset, AssetKey};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors from asset enumeration.
///
/// Any read failure aborts the walk — a partial asset list must never reach
/// the sync engine.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> AssetError {
    AssetError::Io {
        path: path.into(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Enumerate all regular files under `build_dir`, recursively.
///
/// Keys preserve the relative directory structure with `/` separators on
/// every platform. The build directory itself must exist; callers are
/// expected to precheck, but a missing root still fails cleanly here.
pub fn enumerate(build_dir: &Path) -> Result<Vec<Asset>, AssetError> {
    let mut assets = Vec::new();
    walk(build_dir, build_dir, &mut assets)?;
    Ok(assets)
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<Asset>) -> Result<(), AssetError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| io_err(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            walk(root, &path, out)?;
        } else {
            out.push(Asset {
                key: key_for(root, &path),
                content_type: content_type_for(&path),
                ignored: is_ignored(root, &path),
                path,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

/// Relative path under `root`, joined with `/` regardless of platform.
fn key_for(root: &Path, path: &Path) -> AssetKey {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    AssetKey(joined)
}

// ---------------------------------------------------------------------------
// Content type derivation
// ---------------------------------------------------------------------------

fn content_type_for(path: &Path) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    match charset_for(&mime) {
        Some(charset) => format!("{mime}; charset={charset}"),
        None => mime.to_string(),
    }
}

/// Charset suffix for text-like types, mirroring the usual MIME registry
/// defaults. Binary types get none.
fn charset_for(mime: &Mime) -> Option<&'static str> {
    if mime.type_() == mime::TEXT {
        return Some("utf-8");
    }
    if mime.type_() == mime::APPLICATION
        && (mime.subtype() == mime::JSON
            || mime.subtype() == mime::JAVASCRIPT
            || mime.suffix() == Some(mime::JSON))
    {
        return Some("utf-8");
    }
    None
}

// ---------------------------------------------------------------------------
// Ignore rules
// ---------------------------------------------------------------------------

/// Pure predicate over the absolute path: known non-deployable artifacts.
///
/// - macOS Finder metadata (`.DS_Store`)
/// - license sidecar files emitted by bundlers (`*.js.LICENSE.txt`)
/// - the build manifest at the root of the build directory (a nested
///   `asset-manifest.json` is deployable content and is NOT ignored)
fn is_ignored(root: &Path, path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if name.ends_with(".DS_Store") {
        return true;
    }
    if name.ends_with(".js.LICENSE.txt") {
        return true;
    }
    path == root.join("asset-manifest.json")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&path, b"content").expect("write");
    }

    fn find<'a>(assets: &'a [Asset], key: &str) -> &'a Asset {
        assets
            .iter()
            .find(|a| a.key.0 == key)
            .unwrap_or_else(|| panic!("no asset with key '{key}'"))
    }

    #[test]
    fn keys_preserve_nested_structure_with_forward_slashes() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "index.html");
        touch(tmp.path(), "static/js/app.js");
        touch(tmp.path(), "static/media/logo.png");

        let assets = enumerate(tmp.path()).expect("enumerate");
        let keys: Vec<&str> = assets.iter().map(|a| a.key.0.as_str()).collect();
        assert!(keys.contains(&"index.html"));
        assert!(keys.contains(&"static/js/app.js"));
        assert!(keys.contains(&"static/media/logo.png"));
        assert!(
            keys.iter().all(|k| !k.starts_with('/')),
            "keys must not carry a leading separator"
        );
    }

    #[test]
    fn enumeration_order_is_sorted_and_stable() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "zeta.txt");
        touch(tmp.path(), "alpha.txt");
        touch(tmp.path(), "misc/beta.txt");

        let first = enumerate(tmp.path()).expect("enumerate");
        let second = enumerate(tmp.path()).expect("enumerate");
        let keys: Vec<&str> = first.iter().map(|a| a.key.0.as_str()).collect();
        assert_eq!(keys, vec!["alpha.txt", "misc/beta.txt", "zeta.txt"]);
        assert_eq!(first, second, "enumeration must be deterministic");
    }

    #[rstest]
    #[case("index.html", "text/html; charset=utf-8")]
    #[case("styles.css", "text/css; charset=utf-8")]
    #[case("data.json", "application/json; charset=utf-8")]
    #[case("logo.png", "image/png")]
    #[case("logo.svg", "image/svg+xml")]
    #[case("blob.weirdext", "application/octet-stream")]
    fn content_types(#[case] file: &str, #[case] expected: &str) {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), file);
        let assets = enumerate(tmp.path()).expect("enumerate");
        assert_eq!(find(&assets, file).content_type, expected);
    }

    #[rstest]
    #[case(".DS_Store", true)]
    #[case("static/.DS_Store", true)]
    #[case("vendor.js.LICENSE.txt", true)]
    #[case("static/js/2.chunk.js.LICENSE.txt", true)]
    #[case("asset-manifest.json", true)]
    #[case("index.html", false)]
    #[case("LICENSE.txt", false)]
    fn ignore_rules(#[case] file: &str, #[case] expected: bool) {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), file);
        let assets = enumerate(tmp.path()).expect("enumerate");
        assert_eq!(find(&assets, file).ignored, expected, "for '{file}'");
    }

    #[test]
    fn nested_asset_manifest_is_not_ignored() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/asset-manifest.json");
        let assets = enumerate(tmp.path()).expect("enumerate");
        assert!(!find(&assets, "docs/asset-manifest.json").ignored);
    }

    #[test]
    fn missing_root_fails_with_annotated_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("no-such-build");
        let err = enumerate(&missing).unwrap_err();
        let AssetError::Io { path, .. } = err;
        assert_eq!(path, missing);
    }
}
