//! Target triple vs. host platform validation.
//!
//! Release builds must not cross-compile by accident: the build matrix
//! hands each runner a target triple, and this module checks that the
//! triple actually matches the machine it runs on. Triple and host
//! identifiers are both mapped into a shared vocabulary before comparison.

/// Normalized OS and architecture of the machine the tool runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub os: String,
    pub arch: String,
}

impl HostInfo {
    /// Host info from the running process's own platform constants.
    pub fn current() -> Self {
        Self::from_raw(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Builds host info from raw platform identifiers, case-folding and
    /// normalizing them. Tests use this to supply fixed hosts.
    pub fn from_raw(os: &str, arch: &str) -> Self {
        HostInfo {
            os: normalize_os(&os.to_lowercase()).to_string(),
            arch: normalize_arch(&arch.to_lowercase()).to_string(),
        }
    }
}

/// Maps a host OS identifier into the comparison vocabulary.
///
/// Rust reports macOS as `macos`; other platforms report names that are
/// already canonical. Unrecognized values pass through unchanged.
fn normalize_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// Maps an architecture identifier into the comparison vocabulary.
///
/// Covers the aliases seen across platform reporting (`amd64`, `arm64`,
/// `armv7l`). Unmapped values pass through and are compared literally.
fn normalize_arch(arch: &str) -> &str {
    match arch {
        "x86_64" | "amd64" => "x86_64",
        "aarch64" | "arm64" => "aarch64",
        "armv7l" | "armv7" => "armv7",
        other => other,
    }
}

/// Extracts the normalized OS from a target triple.
///
/// Anything that is not recognizably windows/darwin/linux maps to
/// `unknown`, which is an explicit validation failure rather than a
/// silent match.
pub fn target_os(triple: &str) -> &'static str {
    if triple.contains("windows") {
        "windows"
    } else if triple.contains("apple-darwin") {
        "darwin"
    } else if triple.contains("linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// Extracts the normalized architecture from a target triple: the first
/// dash-delimited segment, run through the alias map.
pub fn target_arch(triple: &str) -> &str {
    normalize_arch(triple.split('-').next().unwrap_or(triple))
}

/// Validates a target triple against a host, returning one message per
/// failure. An empty vector means the triple is native to the host.
pub fn validate_target(triple: &str, host: &HostInfo) -> Vec<String> {
    let t_os = target_os(triple);
    let t_arch = target_arch(triple);

    let mut errors = Vec::new();
    if t_os == "unknown" {
        errors.push(format!("unsupported target OS in triple: {triple}"));
    }
    if t_os != host.os {
        errors.push(format!("target OS {t_os} does not match host OS {}", host.os));
    }
    if t_arch != host.arch {
        errors.push(format!(
            "target arch {t_arch} does not match host arch {}",
            host.arch
        ));
    }
    errors
}
