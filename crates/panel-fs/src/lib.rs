//! Filesystem primitives for the panel extension engine
//!
//! Provides slash-normalized paths, best-effort directory walking, atomic
//! writes and format-agnostic config loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use walk::files_with_extension;
