//! Project descriptors for the Mason resolver.
//!
//! A [`ProjectDescriptor`] is one compilation unit's configuration
//! intent, independent of any concrete target: name, source roots,
//! recognized extensions, static excludes, rule overlays, and declared
//! dependency edges. Descriptors are immutable once built and may be
//! resolved against many targets, each resolution producing an
//! independent configuration and source set.

pub mod descriptor;
pub mod error;
pub mod presets;
pub mod sources;

pub use descriptor::{ProjectBuilder, ProjectDescriptor};
pub use error::{ProjectError, Result};
pub use sources::SourceFile;
