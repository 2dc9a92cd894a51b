//! `mason.toml` build-manifest parsing.
//!
//! The manifest is the declarative input: workspace identity, target
//! declarations, and project descriptors. Rule patches are written in a
//! TOML-friendly shape (`"NAME=VALUE"` define strings, default-public
//! dependencies) and converted into the model types on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use mason_config::{
    fragments, Condition, DependencyRef, OutputType, Patch, ResolveContext, RuleSet, Visibility,
};
use mason_project::{presets, ProjectDescriptor};
use mason_targets::{
    AndroidAbi, Optimization, OptimizationSet, Platform, Target, TargetDeclaration,
    ToolingProfile, ToolsSet,
};

/// The top-level manifest structure for a Mason workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MasonManifest {
    /// Workspace identity (required).
    pub workspace: WorkspaceConfig,
    /// Target declarations; defaults to the full desktop + Android set.
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetDecl>,
    /// Project descriptors; defaults to the built-in engine tree.
    #[serde(default, rename = "project")]
    pub projects: Vec<ProjectDecl>,
    /// Extra workspace-wide rules appended after the standard layer.
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleDecl>,
}

/// Workspace identity section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceConfig {
    /// Workspace (solution) name.
    pub name: String,
    /// Canonical root path; relative paths are joined to the manifest's
    /// directory. Defaults to the manifest's directory.
    #[serde(default)]
    pub root: Option<String>,
    /// Whether the built-in engine-wide rule layer applies.
    #[serde(default = "default_true")]
    pub standard_rules: bool,
}

fn default_true() -> bool {
    true
}

/// One target declaration in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDecl {
    /// Target platform.
    pub platform: Platform,
    /// Tooling profile; defaults to vs2022.
    #[serde(default)]
    pub tooling: Option<ToolingProfile>,
    /// Optimization levels; empty means both.
    #[serde(default)]
    pub optimizations: Vec<Optimization>,
    /// Tools-toggle values; empty means tools off only.
    #[serde(default)]
    pub tools: Vec<bool>,
    /// Android ABI (required for Android declarations).
    #[serde(default)]
    pub abi: Option<AndroidAbi>,
}

impl TargetDecl {
    fn to_declaration(&self) -> TargetDeclaration {
        let optimizations = if self.optimizations.is_empty() {
            OptimizationSet::all()
        } else {
            let mut set = OptimizationSet::empty();
            for level in &self.optimizations {
                set.insert(*level);
            }
            set
        };
        let tools = if self.tools.is_empty() {
            ToolsSet::disabled()
        } else {
            let mut set = ToolsSet::empty();
            for enabled in &self.tools {
                set.insert(*enabled);
            }
            set
        };
        TargetDeclaration {
            platform: self.platform,
            tooling: self.tooling.unwrap_or(ToolingProfile::Vs2022),
            optimizations,
            tools,
            abi: self.abi,
        }
    }
}

/// One project entry: either a named built-in preset or an inline
/// descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectDecl {
    /// Built-in preset name (`engine`, `game`, `tools`,
    /// `flux-compiler`).
    #[serde(default)]
    pub preset: Option<String>,
    /// Project name; required for inline descriptors and `game`.
    #[serde(default)]
    pub name: Option<String>,
    /// Primary source root (placeholders allowed).
    #[serde(default)]
    pub source_root: Option<String>,
    /// Additional source roots.
    #[serde(default)]
    pub additional_source_roots: Vec<String>,
    /// Always-applied exclude patterns.
    #[serde(default)]
    pub static_excludes: Vec<String>,
    /// Platform allow-list; absent means all platforms.
    #[serde(default)]
    pub platforms: Option<Vec<Platform>>,
    /// Per-project rule overlays, in precedence order.
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleDecl>,
}

impl ProjectDecl {
    fn to_descriptor(&self) -> Result<ProjectDescriptor> {
        if let Some(preset) = &self.preset {
            if self.source_root.is_some() || !self.rules.is_empty() {
                bail!("preset project '{preset}' does not take inline settings");
            }
            let descriptor = match preset.as_str() {
                "engine" => presets::engine(),
                "tools" => presets::tools(),
                "flux-compiler" => presets::flux_compiler(),
                "game" => {
                    let name = self
                        .name
                        .as_deref()
                        .context("preset 'game' requires a name")?;
                    presets::game(name)
                }
                other => bail!("unknown preset '{other}'"),
            };
            return descriptor.map_err(Into::into);
        }

        let name = self.name.as_deref().context("project entry needs a name")?;
        let source_root = self
            .source_root
            .as_deref()
            .with_context(|| format!("project '{name}' needs a source-root"))?;

        let mut ruleset = RuleSet::new();
        for rule in &self.rules {
            ruleset = ruleset.rule(rule.when.clone(), rule.to_patch());
        }

        let mut builder = ProjectDescriptor::builder(name, source_root)
            .static_excludes(self.static_excludes.iter().cloned())
            .rules(ruleset);
        for root in &self.additional_source_roots {
            builder = builder.additional_source_root(root);
        }
        if let Some(platforms) = &self.platforms {
            builder = builder.platforms(platforms.iter().copied());
        }
        builder.build().map_err(Into::into)
    }
}

/// One rule in manifest form. Defines are `"NAME"` or `"NAME=VALUE"`
/// strings; dependencies default to public, matching how the engine
/// tree declares them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuleDecl {
    #[serde(default)]
    pub when: Condition,
    #[serde(default)]
    pub defines: Vec<String>,
    #[serde(default)]
    pub include_paths: Vec<String>,
    #[serde(default)]
    pub library_paths: Vec<String>,
    #[serde(default)]
    pub library_files: Vec<String>,
    #[serde(default)]
    pub source_excludes: Vec<String>,
    #[serde(default)]
    pub language_standard: Option<String>,
    #[serde(default)]
    pub output: Option<OutputType>,
    #[serde(default)]
    pub precompiled_header: Option<PrecompiledHeaderDecl>,
    #[serde(default)]
    pub dependencies: Vec<DependencyDecl>,
    #[serde(default)]
    pub project_file_name: Option<String>,
    #[serde(default)]
    pub project_path: Option<String>,
}

/// Precompiled-header settings in manifest form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PrecompiledHeaderDecl {
    pub header: String,
    pub source: String,
    #[serde(default)]
    pub exclude_folders: Vec<String>,
}

/// A dependency edge in manifest form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependencyDecl {
    pub project: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

impl RuleDecl {
    fn to_patch(&self) -> Patch {
        let mut patch = Patch::new();
        for define in &self.defines {
            patch = match define.split_once('=') {
                Some((name, value)) => patch.define_value(name, value),
                None => patch.define(define),
            };
        }
        for path in &self.include_paths {
            patch = patch.include_path(path);
        }
        for path in &self.library_paths {
            patch = patch.library_path(path);
        }
        for file in &self.library_files {
            patch = patch.library_file(file);
        }
        for pattern in &self.source_excludes {
            patch = patch.exclude(pattern);
        }
        if let Some(standard) = &self.language_standard {
            patch = patch.language_standard(standard);
        }
        if let Some(output) = self.output {
            patch = patch.output(output);
        }
        if let Some(pch) = &self.precompiled_header {
            patch = patch.precompiled_header(&pch.header, &pch.source);
            for folder in &pch.exclude_folders {
                patch = patch.precomp_exclude(folder);
            }
        }
        for dep in &self.dependencies {
            let edge = match dep.visibility.unwrap_or(Visibility::Public) {
                Visibility::Public => DependencyRef::public(&dep.project),
                Visibility::Private => DependencyRef::private(&dep.project),
            };
            patch = patch.dependency(edge);
        }
        if let Some(name) = &self.project_file_name {
            patch = patch.project_file_name(name);
        }
        if let Some(path) = &self.project_path {
            patch = patch.project_path(path);
        }
        patch
    }
}

impl MasonManifest {
    /// Search upward from `start_dir` for a `mason.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("mason.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: MasonManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing mason.toml")
    }

    /// Expand the declared targets into the concrete, deduplicated,
    /// sorted target list.
    pub fn expand_targets(&self) -> Result<Vec<Target>> {
        let declarations: Vec<TargetDeclaration> = if self.targets.is_empty() {
            vec![
                TargetDeclaration::win64_full(),
                TargetDeclaration::android_arm64(),
            ]
        } else {
            self.targets.iter().map(TargetDecl::to_declaration).collect()
        };
        mason_targets::expand(&declarations).context("expanding target declarations")
    }

    /// Build the project descriptor set.
    pub fn descriptors(&self) -> Result<Vec<ProjectDescriptor>> {
        if self.projects.is_empty() {
            return Ok(vec![
                presets::engine()?,
                presets::tools()?,
                presets::flux_compiler()?,
            ]);
        }
        self.projects.iter().map(ProjectDecl::to_descriptor).collect()
    }

    /// The workspace-wide rule layer: the standard fragments (unless
    /// switched off) followed by the manifest's own rules.
    pub fn workspace_rules(&self) -> RuleSet {
        let mut rules = if self.workspace.standard_rules {
            fragments::standard()
        } else {
            RuleSet::new()
        };
        for rule in &self.rules {
            rules = rules.rule(rule.when.clone(), rule.to_patch());
        }
        rules
    }

    /// The resolve context for a manifest found in `manifest_dir`.
    pub fn resolve_context(&self, manifest_dir: &Path) -> ResolveContext {
        match &self.workspace.root {
            Some(root) => {
                let path = Path::new(root);
                if path.is_absolute() {
                    ResolveContext::new(path)
                } else {
                    ResolveContext::new(manifest_dir.join(path))
                }
            }
            None => ResolveContext::new(manifest_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[workspace]
name = "Zenith"
root = "/work/zenith"

[[target]]
platform = "win64"
optimizations = ["debug", "release"]
tools = [false, true]

[[target]]
platform = "android"
abi = "arm64-v8a"

[[project]]
preset = "engine"

[[project]]
preset = "game"
name = "Sokoban"

[[project]]
name = "Sandbox"
source-root = "{root}/Sandbox"
static-excludes = [".*third_party.*"]
platforms = ["win64"]

[[project.rule]]
when = { platform = "win64" }
defines = ["SANDBOX", "SANDBOX_ROOT=\"{root}/Sandbox/\""]
output = "executable"
dependencies = [{ project = "Zenith" }]
"#;
        let manifest = MasonManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.workspace.name, "Zenith");
        assert!(manifest.workspace.standard_rules);

        let targets = manifest.expand_targets().unwrap();
        // 2 optimizations x 2 toggles on desktop, 2 optimizations on
        // android with tools off.
        assert_eq!(targets.len(), 6);

        let descriptors = manifest.descriptors().unwrap();
        assert_eq!(descriptors.len(), 3);
        assert_eq!(descriptors[2].name(), "Sandbox");
    }

    #[test]
    fn parse_minimal_manifest() {
        let manifest = MasonManifest::from_str("[workspace]\nname = \"Zenith\"\n").unwrap();
        assert_eq!(manifest.expand_targets().unwrap().len(), 6);
        let descriptors = manifest.descriptors().unwrap();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["Zenith", "ZenithTools", "FluxCompiler"]);
    }

    #[test]
    fn inline_rule_conversion() {
        let toml_str = r#"
[workspace]
name = "Zenith"

[[project]]
name = "Sandbox"
source-root = "{root}/Sandbox"

[[project.rule]]
defines = ["FLAG", "VALUED=1"]
dependencies = [
    { project = "Zenith" },
    { project = "Helper", visibility = "private" },
]
"#;
        let manifest = MasonManifest::from_str(toml_str).unwrap();
        let rule = &manifest.projects[0].rules[0];
        let patch = rule.to_patch();
        assert_eq!(patch.defines[0], ("FLAG".to_string(), None));
        assert_eq!(
            patch.defines[1],
            ("VALUED".to_string(), Some("1".to_string()))
        );
        assert_eq!(patch.dependencies[0], DependencyRef::public("Zenith"));
        assert_eq!(patch.dependencies[1], DependencyRef::private("Helper"));
    }

    #[test]
    fn preset_rejects_inline_settings() {
        let toml_str = r#"
[workspace]
name = "Zenith"

[[project]]
preset = "engine"
source-root = "{root}/Elsewhere"
"#;
        let manifest = MasonManifest::from_str(toml_str).unwrap();
        assert!(manifest.descriptors().is_err());
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let toml_str = r#"
[workspace]
name = "Zenith"

[[project]]
preset = "editor"
"#;
        let manifest = MasonManifest::from_str(toml_str).unwrap();
        assert!(manifest.descriptors().is_err());
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(MasonManifest::from_str("not valid toml [[[").is_err());
    }

    #[test]
    fn relative_root_joins_manifest_dir() {
        let toml_str = r#"
[workspace]
name = "Zenith"
root = "engine"
"#;
        let manifest = MasonManifest::from_str(toml_str).unwrap();
        let ctx = manifest.resolve_context(Path::new("/work"));
        assert_eq!(ctx.root_str(), "/work/engine");
    }

    #[test]
    fn absolute_root_wins_over_manifest_dir() {
        let toml_str = r#"
[workspace]
name = "Zenith"
root = "/elsewhere/zenith"
"#;
        let manifest = MasonManifest::from_str(toml_str).unwrap();
        let ctx = manifest.resolve_context(Path::new("/work"));
        assert_eq!(ctx.root_str(), "/elsewhere/zenith");
    }

    #[test]
    fn standard_rules_can_be_switched_off() {
        let toml_str = r#"
[workspace]
name = "Bare"
standard-rules = false

[[rule]]
defines = ["ONLY_THIS"]
"#;
        let manifest = MasonManifest::from_str(toml_str).unwrap();
        let rules = manifest.workspace_rules();
        assert_eq!(rules.rules().len(), 1);
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("mason.toml"),
            "[workspace]\nname = \"parent\"\n",
        )
        .unwrap();

        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_dir) = MasonManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.workspace.name, "parent");
        assert_eq!(found_dir, dir.path());
    }
}
