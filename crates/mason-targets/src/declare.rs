//! Declaration-time axis sets.
//!
//! A declaration may request several values per axis (debug *and*
//! release, tools on *and* off). These set types are distinct from the
//! resolved single-valued axes in [`crate::axes`] so that a bitmask
//! never leaks into a concrete [`crate::Target`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::axes::{AndroidAbi, Optimization, Platform, ToolingProfile};

/// Set of optimization levels a declaration expands over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptimizationSet(BTreeSet<Optimization>);

impl OptimizationSet {
    /// Debug only.
    pub fn debug() -> Self {
        Self([Optimization::Debug].into())
    }

    /// Release only.
    pub fn release() -> Self {
        Self([Optimization::Release].into())
    }

    /// Both debug and release.
    pub fn all() -> Self {
        Self([Optimization::Debug, Optimization::Release].into())
    }

    /// An empty set (invalid to expand; used by manifest defaults).
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, level: Optimization) {
        self.0.insert(level);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Optimization> + '_ {
        self.0.iter().copied()
    }
}

/// Set of tools-toggle values a declaration expands over.
///
/// The original fragment has two flag values (enabled/disabled); a
/// declaration may carry one or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolsSet(BTreeSet<bool>);

impl ToolsSet {
    /// Tools builds only.
    pub fn enabled() -> Self {
        Self([true].into())
    }

    /// Non-tools builds only.
    pub fn disabled() -> Self {
        Self([false].into())
    }

    /// Both tools and non-tools builds.
    pub fn all() -> Self {
        Self([false, true].into())
    }

    /// An empty set (invalid to expand).
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, enabled: bool) {
        self.0.insert(enabled);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}

/// One target declaration: single-valued platform and tooling axes plus
/// multi-valued optimization/toggle sets to expand over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDeclaration {
    /// Target platform.
    pub platform: Platform,
    /// IDE/toolchain generation.
    pub tooling: ToolingProfile,
    /// Optimization levels to expand over.
    pub optimizations: OptimizationSet,
    /// Tools-toggle values to expand over.
    pub tools: ToolsSet,
    /// Android ABI, required when `platform` is Android.
    #[serde(default)]
    pub abi: Option<AndroidAbi>,
}

impl TargetDeclaration {
    /// A desktop declaration expanding over both optimization levels and
    /// both toggle values.
    pub fn win64_full() -> Self {
        Self {
            platform: Platform::Win64,
            tooling: ToolingProfile::Vs2022,
            optimizations: OptimizationSet::all(),
            tools: ToolsSet::all(),
            abi: None,
        }
    }

    /// An Android declaration: both optimization levels, tools off,
    /// arm64-v8a ABI.
    pub fn android_arm64() -> Self {
        Self {
            platform: Platform::Android,
            tooling: ToolingProfile::Vs2022,
            optimizations: OptimizationSet::all(),
            tools: ToolsSet::disabled(),
            abi: Some(AndroidAbi::Arm64V8a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimization_set_dedups() {
        let mut set = OptimizationSet::debug();
        set.insert(Optimization::Debug);
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn all_sets_cover_both_values() {
        assert_eq!(OptimizationSet::all().iter().count(), 2);
        assert_eq!(ToolsSet::all().iter().count(), 2);
    }

    #[test]
    fn preset_declarations() {
        let win = TargetDeclaration::win64_full();
        assert_eq!(win.platform, Platform::Win64);
        assert!(win.abi.is_none());

        let android = TargetDeclaration::android_arm64();
        assert_eq!(android.platform, Platform::Android);
        assert_eq!(android.abi, Some(AndroidAbi::Arm64V8a));
        assert_eq!(android.tools, ToolsSet::disabled());
    }
}
