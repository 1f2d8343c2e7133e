//! TOML description of the manifest registry.
//!
//! The built-in registry covers the studio monorepo layout; release
//! engineering can point `version-sync --config` at a TOML file describing
//! a different file set instead. The file is parsed into
//! [`ManifestEntry`] values and handed to the [`Registry`](crate::registry::Registry)
//! at construction. Load-only configuration; nothing is written back.
//!
//! ```toml
//! [[manifest]]
//! path = "server/Cargo.toml"
//! format = "cargo-package"
//!
//! [[manifest]]
//! path = "Cargo.lock"
//! format = "cargo-lock"
//! package = "opencode-studio"
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::registry::{ManifestEntry, ManifestFormat};

/// Parsed registry description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    #[serde(default, rename = "manifest")]
    pub manifests: Vec<ManifestSpec>,
}

/// One `[[manifest]]` table from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestSpec {
    pub path: PathBuf,
    pub format: FormatKind,
    /// Package to look up; required for `cargo-lock`, rejected elsewhere.
    #[serde(default)]
    pub package: Option<String>,
}

/// Format tag as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    CargoPackage,
    Json,
    PackageLock,
    CargoLock,
}

impl RegistryConfig {
    /// Loads and parses a registry config file.
    ///
    /// Parse errors, unknown fields, and an empty manifest list are all
    /// hard failures: a half-understood registry must not silently shrink
    /// the set of files kept in sync.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read registry config at {}", path.display()))?;
        let config: RegistryConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse registry config at {}", path.display()))?;
        if config.manifests.is_empty() {
            bail!("registry config at {} lists no manifests", path.display());
        }
        Ok(config)
    }

    /// Converts the parsed specs into registry entries, validating the
    /// per-format `package` requirement.
    pub fn into_entries(self) -> Result<Vec<ManifestEntry>> {
        self.manifests
            .into_iter()
            .map(ManifestSpec::into_entry)
            .collect()
    }
}

impl ManifestSpec {
    fn into_entry(self) -> Result<ManifestEntry> {
        let format = match (self.format, self.package) {
            (FormatKind::CargoLock, Some(package)) => ManifestFormat::CargoLock { package },
            (FormatKind::CargoLock, None) => bail!(
                "manifest entry '{}' uses cargo-lock format but names no package",
                self.path.display()
            ),
            (_, Some(_)) => bail!(
                "manifest entry '{}' does not take a package name",
                self.path.display()
            ),
            (FormatKind::CargoPackage, None) => ManifestFormat::CargoPackage,
            (FormatKind::Json, None) => ManifestFormat::Json,
            (FormatKind::PackageLock, None) => ManifestFormat::PackageLock,
        };
        Ok(ManifestEntry::new(self.path, format))
    }
}
