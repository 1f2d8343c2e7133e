//! Semver validation and normalization shared by the sync operations.
//!
//! Versions are compared by normalized string equality only; no ordering
//! semantics are used anywhere in the tool.

use anyhow::{Context, Result, bail};

/// Returns whether `value` is a valid semver string.
pub fn is_valid(value: &str) -> bool {
    semver::Version::parse(value).is_ok()
}

/// Strips one leading `v` from user input and validates semver grammar.
///
/// Accepts both `0.1.0` and `v0.1.0` (the form release tags use) and
/// returns the bare version string.
pub fn normalize(raw: &str) -> Result<String> {
    let candidate = raw.trim();
    let candidate = candidate.strip_prefix('v').unwrap_or(candidate);
    semver::Version::parse(candidate)
        .with_context(|| format!("invalid version '{raw}' (expected semver like 0.1.0 or 0.1.0-beta.1)"))?;
    Ok(candidate.to_string())
}

/// Validates that an expected git tag has the form `v<semver>`.
///
/// The leading `v` is mandatory here, unlike [`normalize`]: a tag without
/// it is malformed even when the remainder parses.
pub fn validate_tag_format(tag: &str) -> Result<()> {
    let malformed = match tag.strip_prefix('v') {
        Some(version) => !is_valid(version),
        None => true,
    };
    if malformed {
        bail!("invalid tag '{tag}' (expected vMAJOR.MINOR.PATCH with optional prerelease/build)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_valid_accepts_standard_forms() {
        assert!(is_valid("0.1.0"));
        assert!(is_valid("1.2.3"));
        assert!(is_valid("1.2.3-beta.1"));
        assert!(is_valid("1.2.3+build.5"));
        assert!(is_valid("1.2.3-rc.1+sha.abc123"));
    }

    #[test]
    fn is_valid_rejects_non_semver() {
        assert!(!is_valid("0"));
        assert!(!is_valid("1.2"));
        assert!(!is_valid("1.2.3.4"));
        assert!(!is_valid("01.2.3"));
        assert!(!is_valid("v1.2.3"));
        assert!(!is_valid("abc"));
        assert!(!is_valid(""));
    }

    #[test]
    fn normalize_strips_leading_v() {
        assert_eq!(normalize("v1.2.3").unwrap(), "1.2.3");
        assert_eq!(normalize("1.2.3").unwrap(), "1.2.3");
    }

    #[test]
    fn normalize_is_invariant_under_v_prefix() {
        for version in ["0.1.0", "1.2.3-beta.1", "2.0.0+build.7"] {
            let prefixed = format!("v{version}");
            assert_eq!(normalize(version).unwrap(), normalize(&prefixed).unwrap());
        }
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize("  v0.3.1 \n").unwrap(), "0.3.1");
    }

    #[test]
    fn normalize_rejects_invalid_input() {
        assert!(normalize("1.2").is_err());
        assert!(normalize("vv1.2.3").is_err());
        assert!(normalize("").is_err());
        let err = normalize("not-a-version").unwrap_err();
        assert!(err.to_string().contains("not-a-version"));
    }

    #[test]
    fn tag_format_requires_v_prefix() {
        assert!(validate_tag_format("v1.2.3").is_ok());
        assert!(validate_tag_format("v1.2.3-beta.1").is_ok());
        assert!(validate_tag_format("1.2.3").is_err());
        assert!(validate_tag_format("V1.2.3").is_err());
        assert!(validate_tag_format("v1.2").is_err());
        assert!(validate_tag_format("").is_err());
    }
}
