//! Configuration records, source pattern matching, and the rule engine
//! for the Mason resolver.
//!
//! The central operation is [`rules::resolve`]: given an ordered
//! [`RuleSet`] of conditioned overlays and one concrete target, produce a
//! fresh, fully-resolved [`Configuration`]. Resolution is a pure data
//! transform — no filesystem checks, no ambient state; the one canonical
//! root path comes in through [`ResolveContext`].

pub mod configuration;
pub mod error;
pub mod fragments;
pub mod pattern;
pub mod rules;

pub use configuration::{
    Configuration, DependencyRef, ExportedSettings, OutputType, PrecompiledHeader, Visibility,
};
pub use error::{ConfigError, Result};
pub use pattern::{normalize_path, ExcludeSet, ExtensionSet};
pub use rules::{expand_template, resolve, Condition, Patch, ResolveContext, Rule, RuleSet};
