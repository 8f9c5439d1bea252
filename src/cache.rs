//! Render cache for incremental gallery builds.
//!
//! Rendering a chart through the external renderer is the slow part of a
//! gallery build, and most examples don't change between documentation runs.
//! This module lets the image stage skip renders whose code hasn't changed
//! since the last build.
//!
//! # Design
//!
//! The cache is a flat JSON map from output image filename to a hex digest
//! of the example's code text, stored as `_image_hashes.json` inside the
//! image directory so it travels with the images (e.g. when the directory is
//! cached in CI). Content-based rather than mtime-based so it survives
//! `git checkout`.
//!
//! A cache hit requires both:
//! 1. The stored digest for the filename equals the current code digest.
//! 2. The image file still exists on disk.
//!
//! Thumbnails are never cached; they are cheap and always regenerated.
//!
//! A missing, corrupt, or version-mismatched cache file degrades to an empty
//! cache, which simply forces a full re-render. `--no-cache` does the same
//! on purpose.
//!
//! The cache file is rewritten after every render and once more at the end
//! of the stage, so an interrupted build keeps the work it finished.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the cache file within the image directory.
const HASH_FILENAME: &str = "_image_hashes.json";

/// Version of the cache format. Bump to invalidate existing caches when the
/// format or digest computation changes.
const CACHE_VERSION: u32 = 1;

/// On-disk map from image filename to code digest.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HashCache {
    pub version: u32,
    pub entries: HashMap<String, String>,
}

impl HashCache {
    /// Empty cache (first build or `--no-cache`).
    pub fn empty() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: HashMap::new(),
        }
    }

    /// Load from the image directory. Returns an empty cache if the file
    /// doesn't exist or can't be parsed (corruption, version mismatch).
    pub fn load(image_dir: &Path) -> Self {
        let path = image_dir.join(HASH_FILENAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let cache: Self = match serde_json::from_str(&content) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        if cache.version != CACHE_VERSION {
            return Self::empty();
        }
        cache
    }

    /// Save to the image directory.
    pub fn save(&self, image_dir: &Path) -> io::Result<()> {
        let path = image_dir.join(HASH_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Whether `filename` may be skipped: stored digest matches `digest`
    /// and the image file is still on disk.
    pub fn is_valid(&self, filename: &str, digest: &str, image_dir: &Path) -> bool {
        self.entries.get(filename).map(String::as_str) == Some(digest)
            && image_dir.join(filename).exists()
    }

    /// Record the digest for an output filename.
    pub fn insert(&mut self, filename: String, digest: String) {
        self.entries.insert(filename, digest);
    }
}

/// Hex digest of an example's code text.
pub fn hash_code(code: &str) -> String {
    let digest = Sha256::digest(code.as_bytes());
    format!("{:x}", digest)
}

/// Resolve the cache file path for an image directory.
pub fn cache_path(image_dir: &Path) -> PathBuf {
    image_dir.join(HASH_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_cache_has_no_entries() {
        let c = HashCache::empty();
        assert_eq!(c.version, CACHE_VERSION);
        assert!(c.entries.is_empty());
    }

    #[test]
    fn is_valid_requires_matching_digest_and_file() {
        let tmp = TempDir::new().unwrap();
        let mut c = HashCache::empty();
        c.insert("bar.png".into(), "abc".into());
        fs::write(tmp.path().join("bar.png"), "png").unwrap();

        assert!(c.is_valid("bar.png", "abc", tmp.path()));
    }

    #[test]
    fn is_valid_false_on_digest_mismatch() {
        let tmp = TempDir::new().unwrap();
        let mut c = HashCache::empty();
        c.insert("bar.png".into(), "abc".into());
        fs::write(tmp.path().join("bar.png"), "png").unwrap();

        assert!(!c.is_valid("bar.png", "other", tmp.path()));
    }

    #[test]
    fn is_valid_false_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let mut c = HashCache::empty();
        c.insert("gone.png".into(), "abc".into());

        assert!(!c.is_valid("gone.png", "abc", tmp.path()));
    }

    #[test]
    fn is_valid_false_without_entry() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bar.png"), "png").unwrap();

        assert!(!HashCache::empty().is_valid("bar.png", "abc", tmp.path()));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut c = HashCache::empty();
        c.insert("a.png".into(), "h1".into());
        c.insert("b.png".into(), "h2".into());
        c.save(tmp.path()).unwrap();

        let loaded = HashCache::load(tmp.path());
        assert_eq!(loaded.version, CACHE_VERSION);
        assert_eq!(loaded.entries.len(), 2);
        assert_eq!(loaded.entries["a.png"], "h1");
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(HashCache::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn load_corrupt_json_returns_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(HASH_FILENAME), "not json").unwrap();
        assert!(HashCache::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn load_wrong_version_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let json = format!(
            r#"{{"version": {}, "entries": {{"a.png": "h"}}}}"#,
            CACHE_VERSION + 1
        );
        fs::write(tmp.path().join(HASH_FILENAME), json).unwrap();
        assert!(HashCache::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn hash_code_deterministic() {
        let h1 = hash_code("chart = make()");
        let h2 = hash_code("chart = make()");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn hash_code_changes_with_content() {
        assert_ne!(hash_code("version 1"), hash_code("version 2"));
    }

    #[test]
    fn cache_path_is_inside_image_dir() {
        assert_eq!(
            cache_path(Path::new("_images")),
            Path::new("_images").join(HASH_FILENAME)
        );
    }
}
