//! The fully-resolved configuration record.
//!
//! One [`Configuration`] is produced per (project, target) pair. It is
//! constructed fresh by every resolution and never mutated afterwards;
//! resolving the same pair twice yields two structurally equal values.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What a project builds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputType {
    /// A linkable executable.
    Executable,
    /// A static library.
    StaticLibrary,
    /// A shared library (Android games build as one).
    SharedLibrary,
}

/// Precompiled-header settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PrecompiledHeader {
    /// Header file included by every translation unit, e.g. `Zenith.h`.
    pub header: String,
    /// Source file that produces the PCH, e.g. `Zenith.cpp`.
    pub source: String,
    /// Sub-trees compiled without the PCH (third-party code).
    #[serde(default)]
    pub exclude_folders: Vec<PathBuf>,
}

/// Whether a dependency's settings propagate past the immediate
/// dependant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Exported settings flow to this project and onward to its
    /// dependants.
    Public,
    /// Exported settings flow to this project only.
    Private,
}

/// A directed dependency edge to another project, by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependencyRef {
    /// Name of the project depended on.
    pub project: String,
    /// Propagation tag.
    pub visibility: Visibility,
}

impl DependencyRef {
    /// A public dependency edge.
    pub fn public(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            visibility: Visibility::Public,
        }
    }

    /// A private dependency edge.
    pub fn private(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            visibility: Visibility::Private,
        }
    }
}

/// The fully-resolved build settings for one (project, target) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Preprocessor defines; `None` values are flag defines without a
    /// value. Keys are unique, iteration order deterministic.
    pub defines: BTreeMap<String, Option<String>>,
    /// Header search paths, in priority order (first match wins).
    pub include_paths: Vec<PathBuf>,
    /// Library search paths, in priority order.
    pub library_paths: Vec<PathBuf>,
    /// Libraries linked into the output.
    pub library_files: Vec<String>,
    /// Per-target source exclude patterns applied on top of the
    /// project's static excludes.
    pub source_excludes: Vec<String>,
    /// Language standard, e.g. `c++20`.
    pub language_standard: Option<String>,
    /// What this configuration builds into.
    pub output: Option<OutputType>,
    /// Precompiled-header settings, if any.
    pub precompiled_header: Option<PrecompiledHeader>,
    /// Dependency edges to other projects.
    pub dependencies: Vec<DependencyRef>,
    /// Generated project file name, e.g. `Zenith_win64`.
    pub project_file_name: Option<String>,
    /// Directory the generated project file lives in.
    pub project_path: Option<PathBuf>,
}

impl Configuration {
    /// An empty configuration; rule application fills it in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a define with this name is present (with or without a
    /// value).
    pub fn has_define(&self, name: &str) -> bool {
        self.defines.contains_key(name)
    }

    /// Value of a define, if present and valued.
    pub fn define_value(&self, name: &str) -> Option<&str> {
        self.defines.get(name).and_then(|v| v.as_deref())
    }

    /// The settings a dependant sees from this configuration: defines
    /// and include paths. Library settings stay with the project that
    /// owns them.
    pub fn exported(&self) -> ExportedSettings {
        ExportedSettings {
            defines: self.defines.clone(),
            include_paths: self.include_paths.clone(),
        }
    }

    /// Merge another project's exported settings into this
    /// configuration. Defines are keyed (no duplicates); include paths
    /// append after this project's own.
    pub fn absorb(&mut self, exported: &ExportedSettings) {
        for (name, value) in &exported.defines {
            self.defines
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        for path in &exported.include_paths {
            if !self.include_paths.contains(path) {
                self.include_paths.push(path.clone());
            }
        }
    }
}

/// The public-facing slice of a configuration that dependency edges
/// carry to dependants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExportedSettings {
    /// Defines visible to dependants.
    pub defines: BTreeMap<String, Option<String>>,
    /// Include paths visible to dependants.
    pub include_paths: Vec<PathBuf>,
}

impl ExportedSettings {
    /// Fold another exported set into this one (transitive public
    /// propagation).
    pub fn extend(&mut self, other: &ExportedSettings) {
        for (name, value) in &other.defines {
            self.defines
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        for path in &other.include_paths {
            if !self.include_paths.contains(path) {
                self.include_paths.push(path.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defines_are_keyed_uniquely() {
        let mut conf = Configuration::new();
        conf.defines.insert("ZENITH_DEBUG".into(), None);
        conf.defines.insert("ZENITH_DEBUG".into(), None);
        assert_eq!(conf.defines.len(), 1);
        assert!(conf.has_define("ZENITH_DEBUG"));
    }

    #[test]
    fn absorb_appends_without_duplicating() {
        let mut upstream = Configuration::new();
        upstream.defines.insert("ZENITH_VULKAN".into(), None);
        upstream.include_paths.push("/root/Zenith".into());

        let mut conf = Configuration::new();
        conf.include_paths.push("/root/Games/Sokoban".into());
        conf.absorb(&upstream.exported());
        conf.absorb(&upstream.exported());

        assert!(conf.has_define("ZENITH_VULKAN"));
        assert_eq!(
            conf.include_paths,
            vec![
                PathBuf::from("/root/Games/Sokoban"),
                PathBuf::from("/root/Zenith"),
            ]
        );
    }

    #[test]
    fn absorb_keeps_local_define_value() {
        let mut conf = Configuration::new();
        conf.defines
            .insert("GAME_ASSETS_DIR".into(), Some("/local/".into()));

        let mut upstream = Configuration::new();
        upstream
            .defines
            .insert("GAME_ASSETS_DIR".into(), Some("/upstream/".into()));

        conf.absorb(&upstream.exported());
        assert_eq!(conf.define_value("GAME_ASSETS_DIR"), Some("/local/"));
    }

    #[test]
    fn exported_settings_extend_transitively() {
        let mut base = ExportedSettings::default();
        base.defines.insert("A".into(), None);
        base.include_paths.push("/a".into());

        let mut next = ExportedSettings::default();
        next.defines.insert("B".into(), None);
        next.include_paths.push("/b".into());
        next.extend(&base);

        assert!(next.defines.contains_key("A"));
        assert!(next.defines.contains_key("B"));
        assert_eq!(next.include_paths.len(), 2);
    }
}
