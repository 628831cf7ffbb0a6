//! Error types for seed registry handling.

/// Failures while loading a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The registry JSON could not be parsed.
    #[error("seed registry is not valid JSON: {message}")]
    Parse {
        /// Parser failure description.
        message: String,
    },
    /// The registry format version is not supported.
    #[error("seed registry version {version} is not supported")]
    UnsupportedVersion {
        /// Version found in the registry.
        version: u32,
    },
}
