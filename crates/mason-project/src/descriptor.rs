//! The project descriptor and its builder.

use mason_config::{
    expand_template, Configuration, ExcludeSet, ExtensionSet, ResolveContext, RuleSet,
};
use mason_targets::{Platform, Target};

use crate::error::{ProjectError, Result};
use crate::sources::{self, SourceFile};

/// One compilation unit's configuration intent, independent of any
/// concrete target.
///
/// Immutable once built; construct with [`ProjectDescriptor::builder`].
/// Source roots and rule patches may contain `{root}`/`{project}`/
/// `{platform}` placeholders, expanded at resolution time.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    name: String,
    source_root: String,
    additional_source_roots: Vec<String>,
    extensions: ExtensionSet,
    static_excludes: ExcludeSet,
    rules: RuleSet,
    /// Platforms this project is legal on; `None` means all.
    platforms: Option<Vec<Platform>>,
}

impl ProjectDescriptor {
    /// Start building a descriptor with the given name and primary
    /// source root.
    pub fn builder(name: impl Into<String>, source_root: impl Into<String>) -> ProjectBuilder {
        ProjectBuilder {
            name: name.into(),
            source_root: source_root.into(),
            additional_source_roots: Vec::new(),
            extensions: ExtensionSet::cpp_defaults(),
            static_excludes: Vec::new(),
            rules: RuleSet::new(),
            platforms: None,
        }
    }

    /// The project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this project participates in builds for the target's
    /// platform.
    pub fn is_legal_for(&self, target: &Target) -> bool {
        match &self.platforms {
            Some(platforms) => platforms.contains(&target.platform),
            None => true,
        }
    }

    /// The descriptor's own rule overlays (applied after the
    /// engine-wide rules).
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The always-applied exclude patterns captured at construction.
    pub fn static_excludes(&self) -> &ExcludeSet {
        &self.static_excludes
    }

    /// Recognized source extensions.
    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    /// All source roots, expanded for the given resolution.
    pub fn source_roots(&self, target: &Target, ctx: &ResolveContext) -> Vec<std::path::PathBuf> {
        std::iter::once(&self.source_root)
            .chain(self.additional_source_roots.iter())
            .map(|root| expand_template(root, &self.name, target, ctx).into())
            .collect()
    }

    /// Resolve this descriptor against one target: engine-wide rules
    /// first, then the descriptor's overlays, then name-derived
    /// defaults for the generated project file.
    pub fn resolve(
        &self,
        engine: &RuleSet,
        target: &Target,
        ctx: &ResolveContext,
    ) -> Result<Configuration> {
        let combined = engine.clone().extend(self.rules.clone());
        let mut conf = mason_config::resolve(&combined, &self.name, target, ctx).map_err(
            |source| ProjectError::Config {
                project: self.name.clone(),
                target: target.name(),
                source,
            },
        )?;

        if conf.project_file_name.is_none() {
            conf.project_file_name =
                Some(expand_template("{project}_{platform}", &self.name, target, ctx));
        }
        if conf.project_path.is_none() {
            conf.project_path =
                Some(expand_template("{root}/Build", &self.name, target, ctx).into());
        }

        Ok(conf)
    }

    /// Select this project's source files for an already-resolved
    /// configuration: walks the source roots, applies the extension
    /// allow-list, then the static excludes, then the configuration's
    /// per-target excludes. Deterministic (sorted) and restartable.
    pub fn resolve_sources(
        &self,
        conf: &Configuration,
        target: &Target,
        ctx: &ResolveContext,
    ) -> Result<Vec<SourceFile>> {
        sources::resolve_sources(self, conf, target, ctx)
    }
}

/// Builder for [`ProjectDescriptor`]. All configuration happens here;
/// the built descriptor is immutable.
#[derive(Debug, Clone)]
pub struct ProjectBuilder {
    name: String,
    source_root: String,
    additional_source_roots: Vec<String>,
    extensions: ExtensionSet,
    static_excludes: Vec<String>,
    rules: RuleSet,
    platforms: Option<Vec<Platform>>,
}

impl ProjectBuilder {
    /// Add a secondary source root (placeholders allowed).
    pub fn additional_source_root(mut self, root: impl Into<String>) -> Self {
        self.additional_source_roots.push(root.into());
        self
    }

    /// Replace the default extension set.
    pub fn extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    /// Add an always-applied exclude pattern.
    pub fn static_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.static_excludes.push(pattern.into());
        self
    }

    /// Add several always-applied exclude patterns.
    pub fn static_excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.static_excludes
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Append the descriptor's rule overlays (applied after the
    /// engine-wide rules, in the order added).
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = self.rules.extend(rules);
        self
    }

    /// Restrict the project to the given platforms.
    pub fn platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platforms = Some(platforms.into_iter().collect());
        self
    }

    /// Compile the static excludes and freeze the descriptor.
    pub fn build(self) -> Result<ProjectDescriptor> {
        let static_excludes =
            ExcludeSet::new(self.static_excludes).map_err(|source| ProjectError::Config {
                project: self.name.clone(),
                target: "<static>".to_string(),
                source,
            })?;
        Ok(ProjectDescriptor {
            name: self.name,
            source_root: self.source_root,
            additional_source_roots: self.additional_source_roots,
            extensions: self.extensions,
            static_excludes,
            rules: self.rules,
            platforms: self.platforms,
        })
    }
}
