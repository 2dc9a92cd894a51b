//! `mason expand` — list the concrete targets the manifest declares.

use anyhow::Result;

use crate::manifest::MasonManifest;

pub fn run(manifest: &MasonManifest) -> Result<()> {
    let targets = manifest.expand_targets()?;
    for target in &targets {
        println!("{}", target.name());
    }
    Ok(())
}
