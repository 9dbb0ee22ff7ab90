/// Errors raised while registering a manifest.
///
/// Registration is the only place the engine fails loudly: these indicate a
/// packaging bug in an extension, not a runtime condition.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The registration carried no package identifier, or an empty one.
    #[error("manifest registration is missing a package identifier")]
    MissingPackage,

    /// Neither `manifest_url` nor `manifest_path` was given.
    #[error("manifest registration for '{package}' has no manifest_url or manifest_path")]
    MissingManifestSource { package: String },

    /// Both `manifest_url` and the legacy `manifest_path` were given.
    #[error("manifest registration for '{package}' sets both manifest_url and manifest_path")]
    ConflictingManifestSource { package: String },

    /// Priority was negative, fractional, or not a number.
    #[error("invalid priority for '{package}': {value} (expected a non-negative integer)")]
    InvalidPriority { package: String, value: String },

    /// The raw registration document could not be read at all.
    #[error("invalid manifest registration: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
