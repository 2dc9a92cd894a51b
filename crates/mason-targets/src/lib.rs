//! Build target axis model and expansion for the Mason resolver.
//!
//! A build target is a tuple of independent axes: platform, tooling
//! profile, optimization level, and feature toggles, plus platform-specific
//! sub-fragments (the Android ABI). Declarations carry *sets* of axis
//! values; [`expand`] turns them into the Cartesian product of concrete
//! single-valued [`Target`]s, rejecting combinations that violate a
//! cross-axis legality rule.

pub mod axes;
pub mod declare;
pub mod error;
pub mod expand;
pub mod target;

pub use axes::{AndroidAbi, Optimization, Platform, ToolingProfile};
pub use declare::{OptimizationSet, TargetDeclaration, ToolsSet};
pub use error::{Result, TargetError};
pub use expand::expand;
pub use target::Target;
