//! The resolved, single-valued build target.

use serde::{Deserialize, Serialize};

use crate::axes::{AndroidAbi, Optimization, Platform, ToolingProfile};

/// One concrete build target: exactly one value per axis.
///
/// Immutable; produced by [`crate::expand`] and consumed by the rule
/// engine. Two targets with equal axis values are the same target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Target {
    /// Target platform.
    pub platform: Platform,
    /// IDE/toolchain generation.
    pub tooling: ToolingProfile,
    /// Optimization level.
    pub optimization: Optimization,
    /// Whether tools are compiled into this build.
    pub tools_enabled: bool,
    /// Android ABI; `Some` exactly when `platform` is Android.
    #[serde(default)]
    pub abi: Option<AndroidAbi>,
}

impl Target {
    /// Human-readable name, e.g. `win64-vs2022-debug-tools` or
    /// `android-vs2022-release-notools-arm64-v8a`.
    ///
    /// Used in error reports, solution file names, and CLI output.
    pub fn name(&self) -> String {
        let tools = if self.tools_enabled { "tools" } else { "notools" };
        match self.abi {
            Some(abi) => format!(
                "{}-{}-{}-{}-{}",
                self.platform, self.tooling, self.optimization, tools, abi
            ),
            None => format!(
                "{}-{}-{}-{}",
                self.platform, self.tooling, self.optimization, tools
            ),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
