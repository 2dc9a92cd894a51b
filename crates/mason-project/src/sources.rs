//! Source-file selection across a descriptor's source roots.
//!
//! Selection is layered: the extension allow-list decides visibility,
//! the descriptor's static excludes remove files from the project
//! entirely, and the resolved configuration's per-target excludes remove
//! files from that target's build. Output is sorted so that repeated
//! runs over the same tree yield the same sequence.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use mason_config::{Configuration, ExcludeSet, ResolveContext};
use mason_targets::Target;

use crate::descriptor::ProjectDescriptor;
use crate::error::{ProjectError, Result};

/// One selected source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// Whether the file is compiled (as opposed to header-only).
    pub compiled: bool,
}

pub(crate) fn resolve_sources(
    descriptor: &ProjectDescriptor,
    conf: &Configuration,
    target: &Target,
    ctx: &ResolveContext,
) -> Result<Vec<SourceFile>> {
    let dynamic_excludes =
        ExcludeSet::new(conf.source_excludes.iter().cloned()).map_err(|source| {
            ProjectError::Config {
                project: descriptor.name().to_string(),
                target: target.name(),
                source,
            }
        })?;

    let extensions = descriptor.extensions();
    let static_excludes = descriptor.static_excludes();
    let mut selected = Vec::new();

    for root in descriptor.source_roots(target, ctx) {
        for entry in WalkDir::new(&root) {
            let entry = entry.map_err(|source| ProjectError::Walk {
                project: descriptor.name().to_string(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !extensions.matches(path) {
                continue;
            }
            if static_excludes.is_excluded(path) || dynamic_excludes.is_excluded(path) {
                continue;
            }
            selected.push(SourceFile {
                path: path.to_path_buf(),
                compiled: extensions.is_compiled(path),
            });
        }
    }

    selected.sort();
    selected.dedup();
    Ok(selected)
}
