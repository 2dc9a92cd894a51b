//! `mason resolve` — compose solutions and print them as JSON.

use std::path::Path;

use anyhow::{bail, Context, Result};

use mason_graph::{compose, Solution};
use mason_targets::Target;

use crate::manifest::MasonManifest;

pub fn run(
    manifest: &MasonManifest,
    manifest_dir: &Path,
    target_name: Option<&str>,
    all: bool,
) -> Result<()> {
    let targets = manifest.expand_targets()?;
    match target_name {
        Some(name) => {
            let target = find_target(&targets, name)?;
            let solution = compose_for(manifest, manifest_dir, &target)?;
            println!("{}", serde_json::to_string_pretty(&solution)?);
        }
        None if all => {
            let mut solutions = Vec::with_capacity(targets.len());
            for target in &targets {
                solutions.push(compose_for(manifest, manifest_dir, target)?);
            }
            println!("{}", serde_json::to_string_pretty(&solutions)?);
        }
        None => bail!("specify --target <name> or --all (run `mason expand` to list targets)"),
    }
    Ok(())
}

pub(crate) fn find_target(targets: &[Target], name: &str) -> Result<Target> {
    targets
        .iter()
        .find(|t| t.name() == name)
        .copied()
        .with_context(|| {
            format!("unknown target '{name}' (run `mason expand` to list declared targets)")
        })
}

fn compose_for(
    manifest: &MasonManifest,
    manifest_dir: &Path,
    target: &Target,
) -> Result<Solution> {
    let descriptors = manifest.descriptors()?;
    let rules = manifest.workspace_rules();
    let ctx = manifest.resolve_context(manifest_dir);
    compose(&manifest.workspace.name, &descriptors, &rules, target, &ctx)
        .with_context(|| format!("composing solution for {}", target.name()))
}
