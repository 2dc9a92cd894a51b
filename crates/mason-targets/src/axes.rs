//! The individual axes of the target space.
//!
//! Each axis is a small enum of legal values. Axes are independent; the
//! legality of *combinations* across axes is enforced during expansion,
//! not here.

use serde::{Deserialize, Serialize};

/// Target platform axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// 64-bit Windows desktop.
    Win64,
    /// Android (mobile).
    Android,
}

impl Platform {
    /// Whether this is a desktop platform (tools builds require one).
    pub fn is_desktop(&self) -> bool {
        matches!(self, Platform::Win64)
    }

    /// Stable lowercase name used in target and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Win64 => "win64",
            Platform::Android => "android",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IDE/toolchain generation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolingProfile {
    /// Visual Studio 2022 project generation.
    Vs2022,
}

impl ToolingProfile {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolingProfile::Vs2022 => "vs2022",
        }
    }
}

impl std::fmt::Display for ToolingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization level of one concrete target.
///
/// This is the *resolved* single value. Declarations use
/// [`crate::declare::OptimizationSet`] to request several levels at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Optimization {
    Debug,
    Release,
}

impl Optimization {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Optimization::Debug => "debug",
            Optimization::Release => "release",
        }
    }
}

impl std::fmt::Display for Optimization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Android ABI sub-fragment, meaningful only when `Platform::Android`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AndroidAbi {
    /// 64-bit ARMv8-A.
    Arm64V8a,
}

impl AndroidAbi {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AndroidAbi::Arm64V8a => "arm64-v8a",
        }
    }
}

impl std::fmt::Display for AndroidAbi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
