//! Error types for graph assembly and solution composition.

use mason_project::ProjectError;

/// Errors from dependency-graph assembly and solution composition.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The dependency graph contains a cycle.
    #[error("cyclic dependency: {}", members.join(" -> "))]
    CyclicDependency {
        /// The projects forming the cycle, in walk order.
        members: Vec<String>,
    },

    /// A dependency edge names a project absent from the solution's
    /// descriptor set.
    #[error("project '{dependant}' depends on '{missing}', which is not in the solution")]
    UnresolvedDependency {
        /// The project declaring the edge.
        dependant: String,
        /// The project the edge points at.
        missing: String,
    },

    /// A descriptor failed to resolve.
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
