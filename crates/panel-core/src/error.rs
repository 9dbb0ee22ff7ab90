//! Error types for panel-core

use std::path::PathBuf;

/// Result type for panel-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or booting the engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration layer parsed but does not describe a valid config
    #[error("Invalid configuration in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// Filesystem or config parsing error from panel-fs
    #[error(transparent)]
    Fs(#[from] panel_fs::Error),

    /// Rejected manifest registration
    #[error(transparent)]
    Manifest(#[from] panel_manifest::Error),
}
