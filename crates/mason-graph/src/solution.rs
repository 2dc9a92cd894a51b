//! Solution composition: one buildable unit per target.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mason_config::{Configuration, ResolveContext, RuleSet, Visibility};
use mason_project::ProjectDescriptor;
use mason_targets::Target;

use crate::error::Result;
use crate::propagate::propagate;

/// One dependency edge in a composed solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SolutionEdge {
    /// The dependant project.
    pub from: String,
    /// The project depended on.
    pub to: String,
    /// Propagation tag of the edge.
    pub visibility: Visibility,
}

/// One project in a composed solution, with its effective
/// configuration (dependency exports absorbed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedProject {
    /// Project name.
    pub name: String,
    /// Effective configuration for the solution's target.
    pub configuration: Configuration,
}

/// The resolved, dependency-complete set of configurations for one
/// target. Read-only once composed; the emitter turns it into native
/// build-tool files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Solution {
    /// Solution name.
    pub name: String,
    /// Generated solution file name, e.g. `Zenith_win64`.
    pub file_name: String,
    /// The target this solution was composed for.
    pub target: Target,
    /// Projects ordered by name.
    pub projects: Vec<ResolvedProject>,
    /// Dependency edges between the projects.
    pub edges: Vec<SolutionEdge>,
}

/// Compose a solution from a set of descriptors for one target.
///
/// Descriptors whose platform allow-list excludes the target are
/// dropped, not resolved. Every remaining descriptor is resolved,
/// dependency settings are propagated, and the result is assembled
/// into a read-only [`Solution`].
pub fn compose(
    name: &str,
    descriptors: &[ProjectDescriptor],
    engine: &RuleSet,
    target: &Target,
    ctx: &ResolveContext,
) -> Result<Solution> {
    let mut configs: BTreeMap<String, Configuration> = BTreeMap::new();
    for descriptor in descriptors {
        if !descriptor.is_legal_for(target) {
            continue;
        }
        let conf = descriptor.resolve(engine, target, ctx)?;
        configs.insert(descriptor.name().to_string(), conf);
    }

    let effective = propagate(&configs)?;

    let mut edges = Vec::new();
    for (project, conf) in &effective {
        for dependency in &conf.dependencies {
            edges.push(SolutionEdge {
                from: project.clone(),
                to: dependency.project.clone(),
                visibility: dependency.visibility,
            });
        }
    }

    let projects = effective
        .into_iter()
        .map(|(name, configuration)| ResolvedProject {
            name,
            configuration,
        })
        .collect();

    Ok(Solution {
        name: name.to_string(),
        file_name: format!("{}_{}", name, target.platform),
        target: *target,
        projects,
        edges,
    })
}
