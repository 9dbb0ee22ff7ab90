//! Text I/O and atomic writes with file locking

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `content` to `path` so readers see either the previous document
/// or the new one, never a partial write.
///
/// Every call stages into its own temp file next to the target and renames
/// it into place. Writers of the same target are serialized through an
/// advisory lock on a sibling `.<name>.lock` file.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();
    let (Some(parent), Some(name)) = (native_path.parent(), native_path.file_name()) else {
        return Err(Error::io(
            &native_path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file path"),
        ));
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let name = name.to_string_lossy();

    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

    let lock_path = parent.join(format!(".{name}.lock"));
    let lock = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;
    lock.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let staged = stage(parent, &name, content).and_then(|temp| {
        temp.persist(&native_path)
            .map(drop)
            .map_err(|e| Error::io(&native_path, e.error))
    });

    lock.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    staged
}

/// Write `content` to a fresh temp file in `dir` (same filesystem as the target).
fn stage(dir: &Path, name: &str, content: &[u8]) -> Result<NamedTempFile> {
    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;
    temp.write_all(content).map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file().sync_all().map_err(|e| Error::io(temp.path(), e))?;
    Ok(temp)
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Remove a file, treating "already gone" as success.
///
/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::remove_file(&native_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}
