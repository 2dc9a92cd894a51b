//! Dependency propagation and solution composition for the Mason
//! resolver.
//!
//! [`propagate`] merges public/private dependency settings across a set
//! of resolved configurations; [`compose`] validates a set of project
//! descriptors against one target and assembles the read-only
//! [`Solution`] handed to the external emitter.

pub mod error;
pub mod propagate;
pub mod solution;

pub use error::{GraphError, Result};
pub use propagate::propagate;
pub use solution::{compose, ResolvedProject, Solution, SolutionEdge};
