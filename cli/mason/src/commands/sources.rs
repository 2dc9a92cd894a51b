//! `mason sources` — list the source files selected for one project on
//! one target.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::commands::resolve::find_target;
use crate::manifest::MasonManifest;

pub fn run(
    manifest: &MasonManifest,
    manifest_dir: &Path,
    project: &str,
    target_name: &str,
) -> Result<()> {
    let targets = manifest.expand_targets()?;
    let target = find_target(&targets, target_name)?;

    let descriptors = manifest.descriptors()?;
    let descriptor = descriptors
        .iter()
        .find(|d| d.name() == project)
        .with_context(|| format!("unknown project '{project}'"))?;
    if !descriptor.is_legal_for(&target) {
        bail!("project '{project}' does not build on {}", target.platform);
    }

    let rules = manifest.workspace_rules();
    let ctx = manifest.resolve_context(manifest_dir);
    let conf = descriptor.resolve(&rules, &target, &ctx)?;
    let files = descriptor.resolve_sources(&conf, &target, &ctx)?;
    println!("{}", serde_json::to_string_pretty(&files)?);
    Ok(())
}
