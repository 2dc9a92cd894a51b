//! Error types for configuration resolution.

/// Errors from pattern compilation and rule resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An exclude pattern is not a valid regular expression.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern text.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// A later, less specific rule set a different output type than an
    /// earlier, more specific one.
    ///
    /// Ordinary overrides (a more specific rule replacing a general one)
    /// are last-writer-wins and legal; this fires only when the later
    /// writer is outranked by the one it would repaint.
    #[error(
        "ambiguous output type for project '{project}' on target '{target}': \
         {first:?} would be repainted to {second:?} by a less specific rule"
    )]
    AmbiguousOutputType {
        /// The project being resolved.
        project: String,
        /// Rendered name of the target being resolved.
        target: String,
        /// Output type set by the earlier rule.
        first: crate::configuration::OutputType,
        /// Conflicting output type set by the later rule.
        second: crate::configuration::OutputType,
    },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
