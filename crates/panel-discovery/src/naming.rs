//! Path to type-identifier translation
//!
//! A candidate file found under a discovery root is mapped to the fully
//! qualified identifier its type is expected to be registered under:
//!
//! ```text
//! app/Panel/Resources/UserResource.rs  --(namespace "App")-->  App::Panel::Resources::UserResource
//! ```

/// Separator between identifier segments.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Translate a path relative to the application root into a type identifier.
///
/// The extension is dropped from the last segment, separators become
/// [`NAMESPACE_SEPARATOR`], and the first segment (the application
/// directory) is replaced by `root_namespace`. A file sitting directly in
/// the application root has no such directory, so the namespace is
/// prepended instead. An empty `root_namespace` keeps the path as written.
pub fn translate(relative_path: &str, root_namespace: &str) -> String {
    let normalized = relative_path.replace('\\', "/");
    let trimmed = normalized.trim_start_matches("./").trim_start_matches('/');

    let mut segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty() && *s != ".").collect();

    if let Some(last) = segments.last_mut() {
        if let Some(idx) = last.rfind('.') {
            if idx > 0 {
                *last = &last[..idx];
            }
        }
    }

    if !root_namespace.is_empty() {
        match segments.len() {
            0 => {}
            1 => segments.insert(0, root_namespace),
            _ => segments[0] = root_namespace,
        }
    }

    segments.join(NAMESPACE_SEPARATOR)
}

/// The last segment of an identifier (`App::Panel::Users` -> `Users`).
pub fn basename(identifier: &str) -> &str {
    identifier
        .rsplit(NAMESPACE_SEPARATOR)
        .next()
        .unwrap_or(identifier)
}
