//! Reader/rewriter for npm `package-lock.json` documents.
//!
//! The lockfile carries the project version in two places: the top-level
//! `version` field and the root package entry `packages[""].version`. Both
//! must agree on read; a disagreement means the lockfile is internally
//! inconsistent, which is a different failure from a missing field.

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;

use crate::json_manifest::to_ascii_pretty;

fn root_package_version(doc: &Value) -> Option<&str> {
    doc.get("packages")?.get("")?.get("version")?.as_str()
}

/// Extracts the project version, requiring the two redundant fields to be
/// present and equal.
pub fn lock_version(content: &str) -> Result<String> {
    let doc: Value = serde_json::from_str(content).context("invalid JSON")?;

    let top_level = doc
        .get("version")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");
    let root_package = root_package_version(&doc).map(str::trim).unwrap_or("");

    if top_level.is_empty() {
        bail!("cannot find top-level version");
    }
    if root_package.is_empty() {
        bail!("cannot find packages[\"\"].version");
    }
    if top_level != root_package {
        bail!(
            "package-lock internal mismatch: top-level is '{top_level}', packages[\"\"] is '{root_package}'"
        );
    }

    Ok(top_level.to_string())
}

/// Computes lockfile text with both version fields set to `new_version`.
///
/// Updates whichever of the two differs; returns `None` when neither
/// changed. The root package object must exist even on the write path.
pub fn set_lock_version(content: &str, new_version: &str) -> Result<Option<String>> {
    let mut doc: Value = serde_json::from_str(content).context("invalid JSON")?;
    let mut changed = false;

    if doc.get("version").and_then(Value::as_str) != Some(new_version) {
        let object = doc
            .as_object_mut()
            .ok_or_else(|| anyhow!("JSON document root is not an object"))?;
        object.insert(
            "version".to_string(),
            Value::String(new_version.to_string()),
        );
        changed = true;
    }

    let root_package = doc
        .get_mut("packages")
        .and_then(|packages| packages.get_mut(""))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| anyhow!("cannot find packages[\"\"] object"))?;

    if root_package.get("version").and_then(Value::as_str) != Some(new_version) {
        root_package.insert(
            "version".to_string(),
            Value::String(new_version.to_string()),
        );
        changed = true;
    }

    if changed {
        Ok(Some(to_ascii_pretty(&doc)?))
    } else {
        Ok(None)
    }
}
