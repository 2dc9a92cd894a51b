//! Error types for target declaration and expansion.

/// Errors from target declaration and expansion.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// A declared combination violates a cross-axis legality rule.
    #[error("invalid axis combination '{target}': {reason}")]
    InvalidAxisCombination {
        /// Rendered name of the offending combination.
        target: String,
        /// Which legality rule was violated.
        reason: String,
    },

    /// Expansion produced no concrete targets at all.
    #[error("target expansion produced no valid targets")]
    NoValidTargets,

    /// A declaration carries an empty axis set.
    #[error("declaration for platform '{platform}' has an empty {axis} axis")]
    EmptyAxis {
        /// Platform of the offending declaration.
        platform: String,
        /// The axis with no declared values.
        axis: &'static str,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
