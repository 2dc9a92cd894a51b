//! Source file selection: extension allow-lists and exclude patterns.
//!
//! Exclusion is a pure OR across the pattern set — a path is excluded if
//! *any* pattern matches the normalized full path. The set is
//! conceptually unordered; permuting the patterns never changes the
//! outcome. Patterns are path-shaped regular expressions written with
//! forward-slash separators; all paths are normalized before matching.

use std::path::Path;

use regex::RegexSet;

use crate::error::{ConfigError, Result};

/// Normalize a path to forward-slash separators for matching.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// An unordered set of exclude patterns compiled for OR-matching.
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    patterns: Vec<String>,
    set: RegexSet,
}

impl ExcludeSet {
    /// Compile a set of patterns. Fails on the first invalid pattern.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let set = RegexSet::new(&patterns).map_err(|source| {
            let pattern = match &source {
                regex::Error::Syntax(s) => first_offending(&patterns, s),
                _ => patterns.join(", "),
            };
            ConfigError::Pattern { pattern, source }
        })?;
        Ok(Self { patterns, set })
    }

    /// An empty set that excludes nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            // An empty RegexSet is always valid.
            set: RegexSet::new([""; 0]).unwrap_or_else(|_| unreachable!()),
        }
    }

    /// Whether any pattern in the set matches the normalized path.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.set.is_match(&normalize_path(path))
    }

    /// The pattern texts, as authored.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn first_offending(patterns: &[String], syntax_msg: &str) -> String {
    // RegexSet reports one combined error; re-compile individually to
    // attribute it to a single pattern.
    for p in patterns {
        if regex::Regex::new(p).is_err() {
            return p.clone();
        }
    }
    syntax_msg.to_string()
}

/// Recognized source extensions, split into compiled and header-only.
///
/// A file whose extension is not in the allow-list is invisible to the
/// resolver regardless of exclude patterns.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtensionSet {
    /// All recognized extensions, with leading dot.
    pub all: Vec<String>,
    /// The subset that is compiled (the rest are header-only).
    pub compile: Vec<String>,
}

impl ExtensionSet {
    /// The engine's defaults: C/C++ sources, headers, and shader stages.
    pub fn cpp_defaults() -> Self {
        Self {
            all: [
                ".cpp", ".c", ".h", ".vert", ".frag", ".comp", ".tese", ".tesc", ".geom", ".fxh",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            compile: [".cpp", ".c"].iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether the path's suffix is in the allow-list.
    pub fn matches(&self, path: &Path) -> bool {
        let name = normalize_path(path);
        self.all.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Whether the path is a compiled source (as opposed to header-only).
    pub fn is_compiled(&self, path: &Path) -> bool {
        let name = normalize_path(path);
        self.compile.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn single_pattern_excludes() {
        let set = ExcludeSet::new([r".*Android.*"]).unwrap();
        assert!(set.is_excluded(Path::new("/engine/Platform/Android/Window.cpp")));
        assert!(!set.is_excluded(Path::new("/engine/Platform/Windows/Window.cpp")));
    }

    #[test]
    fn backslash_paths_are_normalized() {
        let set = ExcludeSet::new([r".*/Android/.*"]).unwrap();
        assert!(set.is_excluded(Path::new(r"engine\Platform\Android\Window.cpp")));
    }

    #[test]
    fn exclusion_is_or_across_the_set() {
        let set = ExcludeSet::new([r".*VulkanSDK.*", r".*glm-master.*"]).unwrap();
        assert!(set.is_excluded(Path::new("/m/VulkanSDK/include/vk.h")));
        assert!(set.is_excluded(Path::new("/m/glm-master/glm/glm.hpp")));
        assert!(!set.is_excluded(Path::new("/m/stb/stb_image.h")));
    }

    #[test]
    fn exclusion_is_order_independent() {
        let patterns = [
            r".*JoltPhysics-5\.4\.0/Build.*",
            r".*imgui-docking/examples.*",
            r".*_Android.*",
            r".*cmake.*",
        ];
        let candidates = [
            "/r/Middleware/JoltPhysics-5.4.0/Build/cmake_all.sh",
            "/r/Middleware/imgui-docking/examples/main.cpp",
            "/r/Zenith/Input_Android.cpp",
            "/r/Zenith/Core/Maths.cpp",
            "/r/CMakeLists.txt",
        ];

        let forward = ExcludeSet::new(patterns).unwrap();
        let mut reversed_patterns = patterns;
        reversed_patterns.reverse();
        let reversed = ExcludeSet::new(reversed_patterns).unwrap();

        for candidate in candidates {
            let path = PathBuf::from(candidate);
            assert_eq!(
                forward.is_excluded(&path),
                reversed.is_excluded(&path),
                "order changed the verdict for {candidate}"
            );
        }
    }

    #[test]
    fn empty_set_excludes_nothing() {
        let set = ExcludeSet::empty();
        assert!(!set.is_excluded(Path::new("/anything/at/all.cpp")));
        assert!(set.is_empty());
    }

    #[test]
    fn invalid_pattern_is_reported_with_its_text() {
        let err = ExcludeSet::new([r".*fine.*", r"*broken"]).unwrap_err();
        match err {
            ConfigError::Pattern { pattern, .. } => assert_eq!(pattern, "*broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extension_allow_list() {
        let exts = ExtensionSet::cpp_defaults();
        assert!(exts.matches(Path::new("src/Main.cpp")));
        assert!(exts.matches(Path::new("src/Maths.h")));
        assert!(exts.matches(Path::new("shaders/Tri.vert")));
        assert!(!exts.matches(Path::new("docs/readme.md")));
        assert!(!exts.matches(Path::new("assets/logo.png")));
    }

    #[test]
    fn compiled_versus_header_only() {
        let exts = ExtensionSet::cpp_defaults();
        assert!(exts.is_compiled(Path::new("src/Main.cpp")));
        assert!(exts.is_compiled(Path::new("src/legacy.c")));
        assert!(!exts.is_compiled(Path::new("src/Main.h")));
        assert!(!exts.is_compiled(Path::new("shaders/Tri.frag")));
    }

    #[test]
    fn unlisted_extension_is_invisible_even_without_excludes() {
        let exts = ExtensionSet::cpp_defaults();
        assert!(!exts.matches(Path::new("/r/Middleware/notes.txt")));
    }
}
