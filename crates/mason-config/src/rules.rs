//! The rule-composition engine.
//!
//! A [`RuleSet`] is an ordered list of conditioned overlays ([`Rule`]s).
//! [`resolve`] walks the list once, applying every patch whose condition
//! matches the target: list-valued settings append, single-valued
//! settings are last-writer-wins. Rule order therefore *is* the
//! precedence order; sets are authored common-first, overlay-last.
//!
//! Patches may reference `{root}`, `{project}`, `{platform}`,
//! `{optimization}`, and `{target}` placeholders, expanded once per
//! resolution from the [`ResolveContext`] and target. The context holds
//! the single canonical root every root-relative path derives from —
//! resolution never consults the process working directory and never
//! touches the filesystem.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use mason_targets::{Optimization, Platform, Target};

use crate::configuration::{
    Configuration, DependencyRef, OutputType, PrecompiledHeader,
};
use crate::error::{ConfigError, Result};

/// Axis requirements a rule is gated on. All set fields must match;
/// an empty condition matches every target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Condition {
    /// Required platform, if any.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// Required optimization level, if any.
    #[serde(default)]
    pub optimization: Option<Optimization>,
    /// Required tools-toggle state, if any.
    #[serde(default)]
    pub tools_enabled: Option<bool>,
}

impl Condition {
    /// Matches every target.
    pub fn always() -> Self {
        Self::default()
    }

    /// Matches targets on the given platform.
    pub fn platform(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
            ..Self::default()
        }
    }

    /// Matches targets at the given optimization level.
    pub fn optimization(optimization: Optimization) -> Self {
        Self {
            optimization: Some(optimization),
            ..Self::default()
        }
    }

    /// Matches targets with the given tools-toggle state.
    pub fn tools(enabled: bool) -> Self {
        Self {
            tools_enabled: Some(enabled),
            ..Self::default()
        }
    }

    /// Additionally require a platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Additionally require an optimization level.
    pub fn with_optimization(mut self, optimization: Optimization) -> Self {
        self.optimization = Some(optimization);
        self
    }

    /// Additionally require a tools-toggle state.
    pub fn with_tools(mut self, enabled: bool) -> Self {
        self.tools_enabled = Some(enabled);
        self
    }

    /// Whether the target satisfies every set requirement.
    pub fn matches(&self, target: &Target) -> bool {
        self.platform.is_none_or(|p| p == target.platform)
            && self
                .optimization
                .is_none_or(|o| o == target.optimization)
            && self
                .tools_enabled
                .is_none_or(|t| t == target.tools_enabled)
    }

    /// How many axes the condition constrains. Used to tell a
    /// legitimate specific-over-general output override from an
    /// ambiguous collision.
    pub fn specificity(&self) -> u32 {
        self.platform.is_some() as u32
            + self.optimization.is_some() as u32
            + self.tools_enabled.is_some() as u32
    }
}

/// One additive overlay of settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Patch {
    /// Defines to add; `None` values are flag defines.
    #[serde(default)]
    pub defines: Vec<(String, Option<String>)>,
    /// Include paths to append.
    #[serde(default)]
    pub include_paths: Vec<String>,
    /// Library paths to append.
    #[serde(default)]
    pub library_paths: Vec<String>,
    /// Library files to append.
    #[serde(default)]
    pub library_files: Vec<String>,
    /// Source exclude patterns to append.
    #[serde(default)]
    pub source_excludes: Vec<String>,
    /// Language standard (last writer wins).
    #[serde(default)]
    pub language_standard: Option<String>,
    /// Output type (last writer wins).
    #[serde(default)]
    pub output: Option<OutputType>,
    /// Precompiled-header settings (last writer wins).
    #[serde(default)]
    pub precompiled_header: Option<PrecompiledHeader>,
    /// Precompiled-header exclude folders. Additive regardless of rule
    /// order: folders declared before the header is set are held back
    /// and attached once it is.
    #[serde(default)]
    pub precomp_exclude_folders: Vec<String>,
    /// Dependency edges to add.
    #[serde(default)]
    pub dependencies: Vec<DependencyRef>,
    /// Generated project file name (last writer wins).
    #[serde(default)]
    pub project_file_name: Option<String>,
    /// Generated project directory (last writer wins).
    #[serde(default)]
    pub project_path: Option<String>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag define.
    pub fn define(mut self, name: impl Into<String>) -> Self {
        self.defines.push((name.into(), None));
        self
    }

    /// Add a valued define. The value may contain placeholders.
    pub fn define_value(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.defines.push((name.into(), Some(value.into())));
        self
    }

    /// Append an include path (placeholders allowed).
    pub fn include_path(mut self, path: impl Into<String>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    /// Append a library search path (placeholders allowed).
    pub fn library_path(mut self, path: impl Into<String>) -> Self {
        self.library_paths.push(path.into());
        self
    }

    /// Append a linked library file.
    pub fn library_file(mut self, file: impl Into<String>) -> Self {
        self.library_files.push(file.into());
        self
    }

    /// Append a source exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.source_excludes.push(pattern.into());
        self
    }

    /// Set the language standard.
    pub fn language_standard(mut self, standard: impl Into<String>) -> Self {
        self.language_standard = Some(standard.into());
        self
    }

    /// Set the output type.
    pub fn output(mut self, output: OutputType) -> Self {
        self.output = Some(output);
        self
    }

    /// Set the precompiled header.
    pub fn precompiled_header(
        mut self,
        header: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        self.precompiled_header = Some(PrecompiledHeader {
            header: header.into(),
            source: source.into(),
            exclude_folders: Vec::new(),
        });
        self
    }

    /// Exclude a sub-tree from the precompiled header (placeholders
    /// allowed).
    pub fn precomp_exclude(mut self, folder: impl Into<String>) -> Self {
        self.precomp_exclude_folders.push(folder.into());
        self
    }

    /// Add a dependency edge.
    pub fn dependency(mut self, dependency: DependencyRef) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Set the generated project file name (placeholders allowed).
    pub fn project_file_name(mut self, name: impl Into<String>) -> Self {
        self.project_file_name = Some(name.into());
        self
    }

    /// Set the generated project directory (placeholders allowed).
    pub fn project_path(mut self, path: impl Into<String>) -> Self {
        self.project_path = Some(path.into());
        self
    }
}

/// A conditioned overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Rule {
    /// When the patch applies.
    pub when: Condition,
    /// What the patch adds.
    pub patch: Patch,
}

impl Rule {
    pub fn new(when: Condition, patch: Patch) -> Self {
        Self { when, patch }
    }
}

/// An ordered list of rules. Order is precedence: later rules override
/// single-valued settings written by earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rule.
    pub fn rule(mut self, when: Condition, patch: Patch) -> Self {
        self.rules.push(Rule::new(when, patch));
        self
    }

    /// Append a shared fragment (another rule set) in its declared
    /// order. This is how common settings are authored once and reused
    /// across descriptors.
    pub fn extend(mut self, fragment: RuleSet) -> Self {
        self.rules.extend(fragment.rules);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The single canonical root every root-relative path derives from.
///
/// The root is lexically normalized (`.` and `..` components folded)
/// exactly once at construction, so identical inputs produce identical
/// configurations regardless of the caller's working directory. This is
/// a pure string computation; the path need not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveContext {
    root: PathBuf,
}

impl ResolveContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: lexical_normalize(&root.into()),
        }
    }

    /// The canonical root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The root rendered with forward slashes and no trailing slash,
    /// as substituted for `{root}`.
    pub fn root_str(&self) -> String {
        let s = self.root.to_string_lossy().replace('\\', "/");
        s.trim_end_matches('/').to_string()
    }
}

/// Fold `.` and `..` components without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve a rule set against one concrete target.
///
/// Walks the rules in order; every matching patch is applied. The
/// output is a fresh [`Configuration`] — resolving the same inputs
/// twice yields structurally equal values. Fails only on an ambiguous
/// output type; missing paths on disk are the emitter's concern, not
/// ours.
pub fn resolve(
    rules: &RuleSet,
    project: &str,
    target: &Target,
    ctx: &ResolveContext,
) -> Result<Configuration> {
    let mut conf = Configuration::new();
    // (previous writer's specificity, value) for the defensive
    // output-type check.
    let mut output_writer: Option<(u32, OutputType)> = None;
    // PCH exclude folders declared before any rule sets the header.
    let mut pending_pch_excludes: Vec<PathBuf> = Vec::new();

    for rule in rules.rules() {
        if !rule.when.matches(target) {
            continue;
        }
        apply_patch(
            &rule.patch,
            &rule.when,
            &mut conf,
            &mut output_writer,
            &mut pending_pch_excludes,
            project,
            target,
            ctx,
        )?;
    }

    Ok(conf)
}

fn apply_patch(
    patch: &Patch,
    when: &Condition,
    conf: &mut Configuration,
    output_writer: &mut Option<(u32, OutputType)>,
    pending_pch_excludes: &mut Vec<PathBuf>,
    project: &str,
    target: &Target,
    ctx: &ResolveContext,
) -> Result<()> {
    for (name, value) in &patch.defines {
        let expanded = value
            .as_ref()
            .map(|v| expand_template(v, project, target, ctx));
        conf.defines.insert(name.clone(), expanded);
    }
    for path in &patch.include_paths {
        conf.include_paths
            .push(expand_template(path, project, target, ctx).into());
    }
    for path in &patch.library_paths {
        conf.library_paths
            .push(expand_template(path, project, target, ctx).into());
    }
    for file in &patch.library_files {
        conf.library_files.push(file.clone());
    }
    for pattern in &patch.source_excludes {
        conf.source_excludes.push(pattern.clone());
    }
    if let Some(standard) = &patch.language_standard {
        conf.language_standard = Some(standard.clone());
    }
    if let Some(output) = patch.output {
        let specificity = when.specificity();
        if let Some((prev_specificity, prev)) = *output_writer {
            // A later, less specific rule cannot silently repaint an
            // output set by a more specific one.
            if prev != output && specificity < prev_specificity {
                return Err(ConfigError::AmbiguousOutputType {
                    project: project.to_string(),
                    target: target.name(),
                    first: prev,
                    second: output,
                });
            }
        }
        *output_writer = Some((specificity, output));
        conf.output = Some(output);
    }
    if let Some(pch) = &patch.precompiled_header {
        let mut pch = pch.clone();
        let mut folders = std::mem::take(pending_pch_excludes);
        folders.extend(pch.exclude_folders.iter().map(|f| {
            PathBuf::from(expand_template(&f.to_string_lossy(), project, target, ctx))
        }));
        pch.exclude_folders = folders;
        conf.precompiled_header = Some(pch);
    }
    for folder in &patch.precomp_exclude_folders {
        let expanded = PathBuf::from(expand_template(folder, project, target, ctx));
        match conf.precompiled_header.as_mut() {
            Some(pch) => pch.exclude_folders.push(expanded),
            // No header yet; hold the folder until a rule sets one.
            None => pending_pch_excludes.push(expanded),
        }
    }
    for dependency in &patch.dependencies {
        if !conf.dependencies.contains(dependency) {
            conf.dependencies.push(dependency.clone());
        }
    }
    if let Some(name) = &patch.project_file_name {
        conf.project_file_name = Some(expand_template(name, project, target, ctx));
    }
    if let Some(path) = &patch.project_path {
        conf.project_path = Some(expand_template(path, project, target, ctx).into());
    }
    Ok(())
}

/// Expand `{root}`, `{project}`, `{platform}`, `{optimization}`, and
/// `{target}` placeholders. Also used by descriptors whose source
/// roots are written root-relative.
pub fn expand_template(
    text: &str,
    project: &str,
    target: &Target,
    ctx: &ResolveContext,
) -> String {
    text.replace("{root}", &ctx.root_str())
        .replace("{project}", project)
        .replace("{platform}", target.platform.as_str())
        .replace("{optimization}", target.optimization.as_str())
        .replace("{target}", &target.name())
}
