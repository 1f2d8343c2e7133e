//! Reader/rewriter for the `version` field of a Cargo manifest's
//! `[package]` table.
//!
//! Deliberately line-oriented instead of going through a TOML parser: a
//! parse/reserialize cycle could reorder tables or normalize formatting
//! far away from the version field. Only the quoted value on the matched
//! line is replaced; every other byte, including each line's terminator,
//! is preserved.

use anyhow::{Result, bail};

use crate::line_edit::{quoted_value_span, splice, split_keepends, split_line_ending};

/// Extracts the `[package]` version from manifest text.
///
/// Only `version = "..."` lines inside the `[package]` table count; a
/// `version` key under `[dependencies]` or any other table is ignored.
pub fn package_version(content: &str) -> Result<String> {
    let mut in_package = false;

    for line in split_keepends(content) {
        let stripped = line.trim();
        if stripped.starts_with('[') && stripped.ends_with(']') {
            in_package = stripped == "[package]";
            continue;
        }
        if !in_package {
            continue;
        }

        let (body, _) = split_line_ending(line);
        if let Some(span) = quoted_value_span(body, "version") {
            return Ok(body[span].to_string());
        }
    }

    bail!("cannot find [package] version");
}

/// Computes manifest text with the `[package]` version replaced.
///
/// Returns `None` when the manifest already records `new_version`, so
/// callers can skip the write and avoid a spurious diff.
pub fn set_package_version(content: &str, new_version: &str) -> Result<Option<String>> {
    let lines = split_keepends(content);
    let mut in_package = false;

    for (idx, line) in lines.iter().enumerate() {
        let stripped = line.trim();
        if stripped.starts_with('[') && stripped.ends_with(']') {
            in_package = stripped == "[package]";
            continue;
        }
        if !in_package {
            continue;
        }

        let (body, ending) = split_line_ending(line);
        let Some(span) = quoted_value_span(body, "version") else {
            continue;
        };

        if &body[span.clone()] == new_version {
            return Ok(None);
        }

        let mut out = String::with_capacity(content.len() + new_version.len());
        for kept in &lines[..idx] {
            out.push_str(kept);
        }
        out.push_str(&splice(body, span, new_version));
        out.push_str(ending);
        for kept in &lines[idx + 1..] {
            out.push_str(kept);
        }
        return Ok(Some(out));
    }

    bail!("cannot update [package] version");
}
