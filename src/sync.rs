//! Top-level version synchronization operations: collect, verify
//! consistency, check against a tag, and set a new version everywhere.

use anyhow::{Result, bail};
use std::collections::BTreeMap;

use crate::registry::{ManifestEntry, Registry};
use crate::version;

/// Reads every registry entry and validates each extracted value against
/// semver grammar, so non-semver content (a lockfile's bare `version = 4`
/// meta field, say) cannot leak into the consistency check.
///
/// Returns a map from file identifier to version.
pub fn collect_versions(registry: &Registry) -> Result<BTreeMap<String, String>> {
    let mut versions = BTreeMap::new();
    for entry in registry.entries() {
        let version = registry.read_version(entry)?;
        versions.insert(entry.path.display().to_string(), version);
    }

    for (path, version) in &versions {
        if !version::is_valid(version) {
            bail!("invalid semver in {path}: '{version}'");
        }
    }

    Ok(versions)
}

/// Verifies that every file reports the same version and returns it.
///
/// On disagreement the error groups files by their version, both levels
/// sorted, so the report is deterministic and diffable.
pub fn ensure_consistent(versions: &BTreeMap<String, String>) -> Result<String> {
    let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (path, version) in versions {
        grouped.entry(version).or_default().push(path);
    }

    if grouped.len() == 1
        && let Some(version) = grouped.keys().next()
    {
        return Ok((*version).to_string());
    }

    let mut report = String::from("version mismatch detected across files:");
    for (version, files) in &grouped {
        report.push_str(&format!("\n  {version}:"));
        for file in files {
            report.push_str(&format!("\n    - {file}"));
        }
    }
    bail!(report);
}

/// Collects and verifies; with a tag, additionally validates the tag's
/// format and that it names exactly the consistent version.
pub fn check(registry: &Registry, expected_tag: Option<&str>) -> Result<String> {
    let versions = collect_versions(registry)?;
    let version = ensure_consistent(&versions)?;

    if let Some(tag) = expected_tag {
        let tag = tag.trim();
        version::validate_tag_format(tag)?;
        let expected = format!("v{version}");
        if tag != expected {
            bail!(
                "tag/version mismatch: tag is '{tag}' but files are '{version}' (expected tag '{expected}')"
            );
        }
    }

    Ok(version)
}

/// Result of a successful [`set`].
#[derive(Debug)]
pub struct SetOutcome {
    /// The verified post-write version.
    pub version: String,
    /// Files that were actually rewritten; entries already at the target
    /// version are excluded.
    pub changed_files: Vec<String>,
}

/// Sets every registry entry to `new_version` and re-verifies.
///
/// All rewrites are staged in memory before anything touches disk, so a
/// failed computation leaves the tree untouched. After committing, the
/// full [`check`] runs again: a writer bug that misses a file surfaces
/// here instead of shipping an inconsistency.
pub fn set(
    registry: &Registry,
    version_input: &str,
    expected_tag: Option<&str>,
) -> Result<SetOutcome> {
    let new_version = version::normalize(version_input)?;

    let mut staged: Vec<(&ManifestEntry, String)> = Vec::new();
    for entry in registry.entries() {
        if let Some(content) = registry.plan_update(entry, &new_version)? {
            staged.push((entry, content));
        }
    }

    let mut changed_files = Vec::with_capacity(staged.len());
    for (entry, content) in &staged {
        registry.commit(entry, content)?;
        changed_files.push(entry.path.display().to_string());
    }

    let version = check(registry, expected_tag)?;
    Ok(SetOutcome {
        version,
        changed_files,
    })
}
