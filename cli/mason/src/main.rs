//! Mason CLI — command-line front end for the build-configuration
//! resolver. Loads a `mason.toml` manifest, expands targets, composes
//! solutions, and prints them as JSON for an external emitter.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use manifest::MasonManifest;

#[derive(Parser)]
#[command(name = "mason", version, about = "Declarative build-configuration resolver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the concrete targets the manifest expands to
    Expand,
    /// Compose solutions and print them as JSON
    Resolve {
        /// Target name (e.g., win64-vs2022-debug-tools)
        #[arg(long)]
        target: Option<String>,
        /// Resolve every declared target
        #[arg(long)]
        all: bool,
    },
    /// List the source files selected for a project on one target
    Sources {
        /// Project name
        project: String,
        /// Target name
        #[arg(long)]
        target: String,
    },
    /// Expand and compose everything, reporting the first error
    Validate,
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let (manifest, manifest_dir) = load_manifest_required(&cwd)?;

    match cli.command {
        Commands::Expand => commands::expand::run(&manifest),
        Commands::Resolve { target, all } => {
            commands::resolve::run(&manifest, &manifest_dir, target.as_deref(), all)
        }
        Commands::Sources { project, target } => {
            commands::sources::run(&manifest, &manifest_dir, &project, &target)
        }
        Commands::Validate => commands::validate::run(&manifest, &manifest_dir),
    }
}

/// Load the manifest, erroring if none is found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(MasonManifest, PathBuf)> {
    match MasonManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((manifest, dir)),
        None => anyhow::bail!("no mason.toml found in this directory or any parent"),
    }
}
