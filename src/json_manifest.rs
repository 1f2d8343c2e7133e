//! Reader/rewriter for a top-level `version` field in JSON documents
//! (package.json, tauri.conf.json and friends).
//!
//! Unlike the line-oriented manifest formats, JSON files are fully
//! reparsed and reserialized on write: 2-space indent, non-ASCII escaped,
//! trailing newline. Key order survives the round trip (serde_json's
//! `preserve_order`), so the only collateral change is normalized
//! whitespace.

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use std::fmt::Write as _;

/// Extracts the top-level `version` field from a JSON document.
pub fn document_version(content: &str) -> Result<String> {
    let doc: Value = serde_json::from_str(content).context("invalid JSON")?;
    match doc.get("version") {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::String(_)) | None => bail!("cannot find JSON version field"),
        Some(other) => bail!("JSON version field is not a string (found {other})"),
    }
}

/// Computes document text with the top-level `version` field set.
///
/// Returns `None` when the document already records `new_version`.
pub fn set_document_version(content: &str, new_version: &str) -> Result<Option<String>> {
    let mut doc: Value = serde_json::from_str(content).context("invalid JSON")?;
    if doc.get("version").and_then(Value::as_str) == Some(new_version) {
        return Ok(None);
    }

    let object = doc
        .as_object_mut()
        .ok_or_else(|| anyhow!("JSON document root is not an object"))?;
    object.insert(
        "version".to_string(),
        Value::String(new_version.to_string()),
    );

    Ok(Some(to_ascii_pretty(&doc)?))
}

/// Serializes a JSON value with 2-space indent, `\uXXXX` escapes for every
/// non-ASCII character (surrogate pairs above the BMP), and a trailing
/// newline.
///
/// serde_json only escapes what JSON requires, so the ASCII transform runs
/// as a post-pass. It is safe on serialized output: non-ASCII characters
/// can only occur inside string literals there.
pub fn to_ascii_pretty(value: &Value) -> Result<String> {
    let pretty =
        serde_json::to_string_pretty(value).context("failed to serialize JSON document")?;

    let mut out = String::with_capacity(pretty.len() + 1);
    for c in pretty.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    out.push('\n');
    Ok(out)
}
