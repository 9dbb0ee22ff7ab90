//! Application-tree fixtures for tests.
//!
//! Every fixture lives in its own temporary directory that is removed when
//! the fixture is dropped.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway application root.
///
/// # Panics
/// All helpers panic on filesystem errors; they are for tests only.
pub struct AppFixture {
    dir: TempDir,
}

impl AppFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("AppFixture: failed to create temp dir: {e}"));
        Self { dir }
    }

    /// Absolute application root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the fixture (not created).
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("AppFixture: failed to create {}: {e}", parent.display()));
        }
        fs::write(&path, content).unwrap_or_else(|e| panic!("AppFixture: failed to write {}: {e}", path.display()));
        path
    }

    /// Create an empty file for each relative path.
    pub fn touch_all(&self, relatives: &[&str]) {
        for relative in relatives {
            self.write(relative, "");
        }
    }

    /// Write a JSON manifest document.
    pub fn write_manifest(&self, relative: &str, document: &serde_json::Value) -> PathBuf {
        let body = serde_json::to_string_pretty(document)
            .unwrap_or_else(|e| panic!("AppFixture: failed to serialize manifest: {e}"));
        self.write(relative, &body)
    }

    /// Create a directory (and parents) without any files in it.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap_or_else(|e| panic!("AppFixture: failed to create {}: {e}", path.display()));
        path
    }
}

impl Default for AppFixture {
    fn default() -> Self {
        Self::new()
    }
}
