//! Best-effort recursive directory listing

use crate::NormalizedPath;
use walkdir::WalkDir;

/// List every file under `dir` whose extension is one of `extensions`.
///
/// A missing directory yields an empty list. Entries that cannot be read
/// (permission errors, dangling symlinks) are skipped. Entries are visited
/// sorted by file name, so the result order is stable across runs.
pub fn files_with_extension<S: AsRef<str>>(dir: &NormalizedPath, extensions: &[S]) -> Vec<NormalizedPath> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir.to_native())
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry under {}: {}", dir, e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = NormalizedPath::new(entry.path());
        let matches = path.extension().is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.as_ref().eq_ignore_ascii_case(ext))
        });
        if matches {
            files.push(path);
        }
    }

    files
}
