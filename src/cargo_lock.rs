//! Reader/rewriter for the project's own entry in a Cargo.lock file.
//!
//! Cargo.lock is a sequence of `[[package]]` blocks. The project's root
//! package is the first block whose `name` matches the requested package
//! AND which has no `source` field. Registry-resolved crates carry
//! `source`, so a third-party crate that happens to share the project's
//! name is never selected. Rewrites replace only the quoted value on the
//! matched block's version line; every other byte of the file, including
//! line terminators, is preserved.

use anyhow::{Result, anyhow, bail};

use crate::line_edit::{quoted_value_span, splice, split_keepends, split_line_ending};

const BLOCK_MARKER: &str = "[[package]]";

/// Fields extracted from one `[[package]]` block.
#[derive(Debug, Default)]
struct PackageBlock<'a> {
    name: Option<&'a str>,
    version: Option<&'a str>,
    /// Index of the version line in the keepends line list.
    version_line: Option<usize>,
    has_source: bool,
}

/// Matches `key = "value"` spanning the entire trimmed line, as Cargo
/// writes lock entries. Lines with trailing content do not count.
fn exact_quoted<'a>(stripped: &'a str, key: &str) -> Option<&'a str> {
    let span = quoted_value_span(stripped, key)?;
    if !stripped[span.end + 1..].is_empty() {
        return None;
    }
    Some(&stripped[span])
}

fn parse_blocks<'a>(lines: &[&'a str]) -> Vec<PackageBlock<'a>> {
    let mut blocks = Vec::new();
    let mut current: Option<PackageBlock<'a>> = None;

    for (idx, raw) in lines.iter().enumerate() {
        let stripped = raw.trim();
        if stripped == BLOCK_MARKER {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            current = Some(PackageBlock::default());
            continue;
        }

        let Some(block) = current.as_mut() else {
            continue;
        };
        if let Some(value) = exact_quoted(stripped, "name") {
            block.name = Some(value);
        }
        if let Some(value) = exact_quoted(stripped, "version") {
            block.version = Some(value);
            block.version_line = Some(idx);
        }
        if stripped.starts_with("source = ") {
            block.has_source = true;
        }
    }

    if let Some(block) = current.take() {
        blocks.push(block);
    }
    blocks
}

fn find_project_block<'a>(lines: &[&'a str], package: &str) -> Option<PackageBlock<'a>> {
    parse_blocks(lines)
        .into_iter()
        .find(|block| block.name == Some(package) && !block.has_source)
}

/// Extracts the locked version of the named package.
///
/// A matching block without a version field is structurally malformed and
/// reported distinctly from the package being absent altogether.
pub fn package_version(content: &str, package: &str) -> Result<String> {
    let lines = split_keepends(content);
    match find_project_block(&lines, package) {
        Some(block) => block
            .version
            .map(str::to_string)
            .ok_or_else(|| anyhow!("missing lockfile version for package '{package}'")),
        None => bail!("cannot find lockfile package '{package}'"),
    }
}

/// Computes lockfile text with the named package's version replaced.
///
/// Returns `None` when the locked version already equals `new_version`.
pub fn set_package_version(
    content: &str,
    package: &str,
    new_version: &str,
) -> Result<Option<String>> {
    let lines = split_keepends(content);
    let block = find_project_block(&lines, package)
        .ok_or_else(|| anyhow!("cannot find lockfile package '{package}'"))?;
    let version_line = block
        .version_line
        .ok_or_else(|| anyhow!("missing lockfile version for package '{package}'"))?;

    let (body, ending) = split_line_ending(lines[version_line]);
    let span = quoted_value_span(body, "version").ok_or_else(|| {
        anyhow!("unexpected lockfile version format at line {}", version_line + 1)
    })?;

    if &body[span.clone()] == new_version {
        return Ok(None);
    }

    let mut out = String::with_capacity(content.len() + new_version.len());
    for (idx, line) in lines.iter().enumerate() {
        if idx == version_line {
            out.push_str(&splice(body, span.clone(), new_version));
            out.push_str(ending);
        } else {
            out.push_str(line);
        }
    }
    Ok(Some(out))
}
