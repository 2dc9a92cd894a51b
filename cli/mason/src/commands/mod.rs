//! CLI command implementations.

pub mod expand;
pub mod resolve;
pub mod sources;
pub mod validate;
