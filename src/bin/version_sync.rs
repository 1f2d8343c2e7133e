//! Sync and validate the project version across the monorepo's manifests.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use studio_release_tools::config::RegistryConfig;
use studio_release_tools::output;
use studio_release_tools::registry::Registry;
use studio_release_tools::sync;

/// Sync and validate the project version across server/web/desktop manifests.
#[derive(Parser, Debug)]
#[command(
    name = "version-sync",
    version,
    about,
    after_help = "Examples:\n  version-sync check\n  version-sync check --tag v0.1.0\n  version-sync set 0.2.0\n  version-sync set v0.2.0 --tag v0.2.0"
)]
struct Cli {
    /// Repository root the registry paths are resolved against.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// TOML file describing the manifest registry (defaults to the
    /// built-in studio layout).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that every manifest records the same version.
    Check {
        /// Expected git tag (example: v0.1.0).
        #[arg(long)]
        tag: Option<String>,
    },

    /// Set all versions in one command.
    Set {
        /// Semver value (example: 0.1.0 or v0.1.0).
        version: String,

        /// Expected git tag to validate after the update (example: v0.1.0).
        #[arg(long)]
        tag: Option<String>,
    },
}

fn build_registry(cli: &Cli) -> Result<Registry> {
    let entries = match &cli.config {
        Some(path) => RegistryConfig::load(path)?.into_entries()?,
        None => return Ok(Registry::studio_layout(&cli.root)),
    };
    Ok(Registry::new(&cli.root, entries))
}

fn run(cli: &Cli, command: &Command) -> Result<()> {
    let registry = build_registry(cli)?;

    match command {
        Command::Check { tag } => {
            let version = sync::check(&registry, tag.as_deref())?;
            output::success("OK:", &format!("version check passed: {version}"));
            if let Some(tag) = tag {
                output::success("OK:", &format!("tag check passed: {tag}"));
            }
        }
        Command::Set { version, tag } => {
            let outcome = sync::set(&registry, version, tag.as_deref())?;
            output::success("OK:", &format!("version updated to {}", outcome.version));
            if outcome.changed_files.is_empty() {
                output::status("no files changed");
            } else {
                output::status("updated files:");
                for file in &outcome.changed_files {
                    output::detail(&format!("- {file}"));
                }
            }
            if let Some(tag) = tag {
                output::success("OK:", &format!("tag check passed: {tag}"));
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command.as_ref() else {
        let _ = Cli::command().print_help();
        process::exit(2);
    };

    if let Err(err) = run(&cli, command) {
        output::fail("ERROR:", &format!("version sync failed: {err:#}"));
        process::exit(1);
    }
}
