//! `mason validate` — expand and compose everything, reporting the
//! first error.

use std::path::Path;

use anyhow::{Context, Result};

use mason_graph::compose;

use crate::manifest::MasonManifest;

pub fn run(manifest: &MasonManifest, manifest_dir: &Path) -> Result<()> {
    let targets = manifest.expand_targets()?;
    let descriptors = manifest.descriptors()?;
    let rules = manifest.workspace_rules();
    let ctx = manifest.resolve_context(manifest_dir);

    for target in &targets {
        compose(&manifest.workspace.name, &descriptors, &rules, target, &ctx)
            .with_context(|| format!("composing solution for {}", target.name()))?;
    }

    println!(
        "ok: {} targets, {} projects",
        targets.len(),
        descriptors.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_tree_validates() {
        let manifest = MasonManifest::from_str(
            "[workspace]\nname = \"Zenith\"\nroot = \"/work/zenith\"\n",
        )
        .unwrap();
        run(&manifest, Path::new("/work")).unwrap();
    }

    #[test]
    fn missing_dependency_fails_validation() {
        let manifest = MasonManifest::from_str(
            r#"
[workspace]
name = "Zenith"
root = "/work/zenith"

[[project]]
preset = "game"
name = "Sokoban"
"#,
        )
        .unwrap();
        // Sokoban depends on the engine, which is absent.
        assert!(run(&manifest, Path::new("/work")).is_err());
    }

    #[test]
    fn cyclic_manifest_fails_validation() {
        let manifest = MasonManifest::from_str(
            r#"
[workspace]
name = "Zenith"
standard-rules = false

[[project]]
name = "A"
source-root = "{root}/A"

[[project.rule]]
dependencies = [{ project = "B" }]

[[project]]
name = "B"
source-root = "{root}/B"

[[project.rule]]
dependencies = [{ project = "A" }]
"#,
        )
        .unwrap();
        let err = run(&manifest, Path::new("/work")).unwrap_err();
        assert!(format!("{err:#}").contains("cyclic dependency"));
    }
}
