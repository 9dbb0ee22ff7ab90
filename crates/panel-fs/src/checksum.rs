//! SHA-256 digests
//!
//! Used to derive stable cache keys from discovery root paths.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of `content`.
pub fn hex_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
