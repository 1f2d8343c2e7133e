//! The manifest registry: the explicit list of files the synchronizer
//! operates on, each tagged with its format handler.
//!
//! The registry is constructed data rather than global state: callers
//! build one (or load one from a TOML description, see [`crate::config`])
//! and hand it to the sync operations, so the file set is swappable in
//! tests.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::{cargo_lock, cargo_toml, json_manifest, package_lock};

/// How the version field is located within one registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestFormat {
    /// `version = "..."` under the `[package]` table of a Cargo manifest.
    CargoPackage,
    /// Top-level `version` field of a JSON document.
    Json,
    /// npm package-lock.json with its two redundant version fields.
    PackageLock,
    /// `[[package]]` block in a Cargo.lock, looked up by package name.
    CargoLock { package: String },
}

/// One file the synchronizer reads and rewrites.
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    /// Path relative to the registry root; also the identifier used in
    /// reports and error messages.
    pub path: PathBuf,
    pub format: ManifestFormat,
}

impl ManifestEntry {
    pub fn new(path: impl Into<PathBuf>, format: ManifestFormat) -> Self {
        ManifestEntry {
            path: path.into(),
            format,
        }
    }
}

/// A root directory plus the manifest entries resolved against it.
#[derive(Debug, Clone)]
pub struct Registry {
    root: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl Registry {
    pub fn new(root: impl Into<PathBuf>, entries: Vec<ManifestEntry>) -> Self {
        Registry {
            root: root.into(),
            entries,
        }
    }

    /// Registry covering the studio monorepo layout.
    pub fn studio_layout(root: impl Into<PathBuf>) -> Self {
        Self::new(root, studio_entries())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    fn resolve(&self, entry: &ManifestEntry) -> PathBuf {
        self.root.join(&entry.path)
    }

    fn read_content(&self, entry: &ManifestEntry) -> Result<String> {
        std::fs::read_to_string(self.resolve(entry))
            .with_context(|| format!("failed to read {}", entry.path.display()))
    }

    /// Extracts the version recorded in one registry entry.
    pub fn read_version(&self, entry: &ManifestEntry) -> Result<String> {
        let content = self.read_content(entry)?;
        let version = match &entry.format {
            ManifestFormat::CargoPackage => cargo_toml::package_version(&content),
            ManifestFormat::Json => json_manifest::document_version(&content),
            ManifestFormat::PackageLock => package_lock::lock_version(&content),
            ManifestFormat::CargoLock { package } => {
                cargo_lock::package_version(&content, package)
            }
        };
        version.with_context(|| entry.path.display().to_string())
    }

    /// Computes the rewritten content for one entry, or `None` when the
    /// file already records `new_version`. Nothing touches disk here.
    pub fn plan_update(&self, entry: &ManifestEntry, new_version: &str) -> Result<Option<String>> {
        let content = self.read_content(entry)?;
        let planned = match &entry.format {
            ManifestFormat::CargoPackage => cargo_toml::set_package_version(&content, new_version),
            ManifestFormat::Json => json_manifest::set_document_version(&content, new_version),
            ManifestFormat::PackageLock => package_lock::set_lock_version(&content, new_version),
            ManifestFormat::CargoLock { package } => {
                cargo_lock::set_package_version(&content, package, new_version)
            }
        };
        planned.with_context(|| entry.path.display().to_string())
    }

    /// Writes previously planned content for one entry.
    pub fn commit(&self, entry: &ManifestEntry, content: &str) -> Result<()> {
        std::fs::write(self.resolve(entry), content)
            .with_context(|| format!("failed to write {}", entry.path.display()))
    }
}

/// The manifest set of the studio monorepo: Cargo manifests for the
/// server and both desktop shells, the JSON documents of the web app and
/// the Tauri configs, the web app's package-lock, and the Cargo.lock of
/// every workspace.
pub fn studio_entries() -> Vec<ManifestEntry> {
    let cargo_lock = |path: &str, package: &str| {
        ManifestEntry::new(
            path,
            ManifestFormat::CargoLock {
                package: package.to_string(),
            },
        )
    };

    vec![
        ManifestEntry::new("server/Cargo.toml", ManifestFormat::CargoPackage),
        ManifestEntry::new("desktop/src-tauri/Cargo.toml", ManifestFormat::CargoPackage),
        ManifestEntry::new(
            "desktop/src-tauri-cef/Cargo.toml",
            ManifestFormat::CargoPackage,
        ),
        ManifestEntry::new("web/package.json", ManifestFormat::Json),
        ManifestEntry::new("desktop/src-tauri/tauri.conf.json", ManifestFormat::Json),
        ManifestEntry::new(
            "desktop/src-tauri/tauri.conf.full.json",
            ManifestFormat::Json,
        ),
        ManifestEntry::new("desktop/src-tauri-cef/tauri.conf.json", ManifestFormat::Json),
        ManifestEntry::new(
            "desktop/src-tauri-cef/tauri.conf.full.json",
            ManifestFormat::Json,
        ),
        ManifestEntry::new("web/package-lock.json", ManifestFormat::PackageLock),
        cargo_lock("Cargo.lock", "opencode-studio"),
        cargo_lock("desktop/src-tauri/Cargo.lock", "opencode-studio-desktop"),
        cargo_lock("desktop/src-tauri-cef/Cargo.lock", "opencode-studio-desktop"),
    ]
}
