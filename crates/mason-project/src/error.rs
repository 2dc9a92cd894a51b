//! Error types for project resolution.

use mason_config::ConfigError;

/// Errors from resolving a project descriptor.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Rule or pattern error during configuration resolution, tagged
    /// with the offending project and target.
    #[error("project '{project}' on target '{target}': {source}")]
    Config {
        /// The project being resolved.
        project: String,
        /// Rendered name of the target.
        target: String,
        /// The underlying configuration error.
        source: ConfigError,
    },

    /// Filesystem error while walking a source root.
    #[error("project '{project}': failed to walk source tree: {source}")]
    Walk {
        /// The project whose sources were being resolved.
        project: String,
        /// The underlying walk error.
        source: walkdir::Error,
    },
}

/// Result type for project operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
