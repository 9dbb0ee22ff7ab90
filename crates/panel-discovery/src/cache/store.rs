//! Cache store abstraction and the in-memory store

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Failures reported by a [`CacheStore`].
///
/// These never escape [`DiscoveryCache`](super::DiscoveryCache); they are
/// logged and discovery proceeds uncached.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("cache store I/O failed: {0}")]
    Fs(#[from] panel_fs::Error),

    #[error("corrupt cache entry {key}: {message}")]
    Corrupt { key: String, message: String },
}

/// Backing store for discovery results.
///
/// Values are the ordered identifier lists produced by discovery. An
/// expired entry must read back as `Ok(None)`.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, CacheError>;

    fn put(&self, key: &str, value: &[String], ttl: Duration) -> Result<(), CacheError>;

    /// Remove an entry. Returns whether one existed.
    fn forget(&self, key: &str) -> Result<bool, CacheError>;
}

struct MemoryEntry {
    value: Vec<String>,
    expires_at: Instant,
}

/// Process-local cache store with passive expiry.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, CacheError> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: &[String], ttl: Duration) -> Result<(), CacheError> {
        let now = Instant::now();
        // Saturate absurd TTLs instead of overflowing Instant
        let expires_at = now
            .checked_add(ttl)
            .or_else(|| now.checked_add(Duration::from_secs(u32::MAX as u64)))
            .unwrap_or(now);
        self.entries.lock().insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_vec(),
                expires_at,
            },
        );
        Ok(())
    }

    fn forget(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.lock().remove(key).is_some())
    }
}

impl std::fmt::Debug for MemoryCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheStore")
            .field("entries", &self.len())
            .finish()
    }
}
