//! File-backed cache store
//!
//! One JSON document per key:
//!
//! ```json
//! { "expires_at": 1767225600, "value": ["App::Panel::Resources::Users"] }
//! ```

use super::store::{CacheError, CacheStore};
use chrono::Utc;
use panel_fs::{NormalizedPath, io};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize)]
struct FileEntry {
    /// Unix timestamp (seconds) after which the entry is stale.
    expires_at: i64,
    value: Vec<String>,
}

/// Cache store that survives process restarts.
///
/// Writes go through [`io::write_atomic`], so concurrent readers see
/// either the old or the new document.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    directory: NormalizedPath,
}

impl FileCacheStore {
    pub fn new(directory: impl Into<NormalizedPath>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &NormalizedPath {
        &self.directory
    }

    fn entry_path(&self, key: &str) -> NormalizedPath {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.directory.join(&format!("{file_name}.json"))
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, CacheError> {
        let path = self.entry_path(key);
        let content = match io::read_text(&path) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: FileEntry = serde_json::from_str(&content).map_err(|e| CacheError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        if Utc::now().timestamp() >= entry.expires_at {
            io::remove_if_exists(&path)?;
            return Ok(None);
        }

        Ok(Some(entry.value))
    }

    fn put(&self, key: &str, value: &[String], ttl: Duration) -> Result<(), CacheError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let entry = FileEntry {
            expires_at: Utc::now().timestamp().saturating_add(ttl_secs),
            value: value.to_vec(),
        };
        let body = serde_json::to_string(&entry).map_err(|e| CacheError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        io::write_text(&self.entry_path(key), &body)?;
        Ok(())
    }

    fn forget(&self, key: &str) -> Result<bool, CacheError> {
        Ok(io::remove_if_exists(&self.entry_path(key))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());
        let value = vec!["App::Panel::Resources::Users".to_string()];

        store.put("panel.discovery.x", &value, Duration::from_secs(60)).unwrap();

        let reopened = FileCacheStore::new(dir.path());
        assert_eq!(reopened.get("panel.discovery.x").unwrap(), Some(value));
    }

    #[test]
    fn test_missing_entry_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path().join("not-created-yet"));
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(!store.forget("anything").unwrap());
    }

    #[test]
    fn test_expired_entry_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());
        store.put("k", &["A".to_string()], Duration::ZERO).unwrap();

        assert_eq!(store.get("k").unwrap(), None);
        assert!(!dir.path().join("k.json").exists());
    }

    #[test]
    fn test_corrupt_entry_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("k.json"), "not json").unwrap();

        let store = FileCacheStore::new(dir.path());
        assert!(matches!(store.get("k"), Err(CacheError::Corrupt { .. })));
    }

    #[test]
    fn test_keys_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());
        store.put("a/b:c", &[], Duration::from_secs(60)).unwrap();
        assert!(dir.path().join("a_b_c.json").exists());
    }
}
