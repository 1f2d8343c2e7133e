//! End-to-end tests for the version synchronizer over a synthetic
//! monorepo tree, exercising every manifest format through the real
//! check/set flows.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use studio_release_tools::registry::{ManifestEntry, ManifestFormat, Registry};
use studio_release_tools::sync;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("relative path has a parent")).unwrap();
    fs::write(path, contents).unwrap();
}

fn cargo_manifest(name: &str, version: &str) -> String {
    format!(
        "[package]\nname = \"{name}\"\nversion = \"{version}\"\nedition = \"2024\"\n\n[dependencies]\nanyhow = {{ version = \"1\" }}\n"
    )
}

fn cargo_lockfile(name: &str, version: &str) -> String {
    format!(
        "# This file is automatically @generated by Cargo.\n\
         # It is not intended for manual editing.\n\
         version = 4\n\
         \n\
         [[package]]\n\
         name = \"anyhow\"\n\
         version = \"1.0.98\"\n\
         source = \"registry+https://github.com/rust-lang/crates.io-index\"\n\
         checksum = \"e16d2d3311acee920a9eb8d33b8cbc1787ce4a264e85f964c2404b969bdcd487\"\n\
         \n\
         [[package]]\n\
         name = \"{name}\"\n\
         version = \"{version}\"\n\
         dependencies = [\n \"anyhow\",\n]\n"
    )
}

fn package_json(version: &str) -> String {
    format!("{{\n  \"name\": \"web\",\n  \"version\": \"{version}\",\n  \"private\": true\n}}\n")
}

fn tauri_conf(version: &str) -> String {
    format!(
        "{{\n  \"productName\": \"Studio\",\n  \"version\": \"{version}\",\n  \"identifier\": \"ai.studio.desktop\"\n}}\n"
    )
}

fn package_lock(top: &str, root: &str) -> String {
    format!(
        "{{\n  \"name\": \"web\",\n  \"version\": \"{top}\",\n  \"lockfileVersion\": 3,\n  \"packages\": {{\n    \"\": {{\n      \"name\": \"web\",\n      \"version\": \"{root}\"\n    }}\n  }}\n}}\n"
    )
}

/// Lays out every file of the studio registry at one version.
fn write_studio_tree(root: &Path, version: &str) {
    write(root, "server/Cargo.toml", &cargo_manifest("opencode-studio", version));
    write(
        root,
        "desktop/src-tauri/Cargo.toml",
        &cargo_manifest("opencode-studio-desktop", version),
    );
    write(
        root,
        "desktop/src-tauri-cef/Cargo.toml",
        &cargo_manifest("opencode-studio-desktop", version),
    );
    write(root, "web/package.json", &package_json(version));
    write(root, "desktop/src-tauri/tauri.conf.json", &tauri_conf(version));
    write(root, "desktop/src-tauri/tauri.conf.full.json", &tauri_conf(version));
    write(root, "desktop/src-tauri-cef/tauri.conf.json", &tauri_conf(version));
    write(root, "desktop/src-tauri-cef/tauri.conf.full.json", &tauri_conf(version));
    write(root, "web/package-lock.json", &package_lock(version, version));
    write(root, "Cargo.lock", &cargo_lockfile("opencode-studio", version));
    write(
        root,
        "desktop/src-tauri/Cargo.lock",
        &cargo_lockfile("opencode-studio-desktop", version),
    );
    write(
        root,
        "desktop/src-tauri-cef/Cargo.lock",
        &cargo_lockfile("opencode-studio-desktop", version),
    );
}

fn studio_registry(dir: &TempDir) -> Registry {
    Registry::studio_layout(dir.path())
}

#[test]
fn check_passes_on_a_consistent_tree() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.1.0");

    let version = sync::check(&studio_registry(&dir), None).unwrap();
    assert_eq!(version, "0.1.0");
}

#[test]
fn collect_reports_every_registry_entry() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.1.0");

    let versions = sync::collect_versions(&studio_registry(&dir)).unwrap();
    assert_eq!(versions.len(), 12);
    assert!(versions.values().all(|v| v == "0.1.0"));
    assert!(versions.contains_key("server/Cargo.toml"));
    assert!(versions.contains_key("web/package-lock.json"));
}

#[test]
fn check_fails_with_a_grouped_mismatch_report() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.1.0");
    write(dir.path(), "web/package.json", &package_json("0.1.1"));

    let err = sync::check(&studio_registry(&dir), None)
        .unwrap_err()
        .to_string();
    assert!(err.contains("version mismatch detected across files:"));
    assert!(err.contains("0.1.0:"));
    assert!(err.contains("0.1.1:"));
    assert!(err.contains("- web/package.json"));
    assert!(err.contains("- server/Cargo.toml"));
}

#[test]
fn check_accepts_a_matching_tag() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "1.2.3");

    let version = sync::check(&studio_registry(&dir), Some("v1.2.3")).unwrap();
    assert_eq!(version, "1.2.3");
}

#[test]
fn check_rejects_a_malformed_tag() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "1.2.3");

    let err = sync::check(&studio_registry(&dir), Some("1.2.3"))
        .unwrap_err()
        .to_string();
    assert!(err.contains("invalid tag"), "got: {err}");
}

#[test]
fn check_rejects_a_mismatched_tag() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "1.2.3");

    let err = sync::check(&studio_registry(&dir), Some("v1.2.4"))
        .unwrap_err()
        .to_string();
    assert!(err.contains("tag/version mismatch"), "got: {err}");
    assert!(err.contains("v1.2.3"));
}

#[test]
fn set_updates_every_file_and_lists_them() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.1.0");
    let registry = studio_registry(&dir);

    let outcome = sync::set(&registry, "0.2.0", None).unwrap();
    assert_eq!(outcome.version, "0.2.0");
    assert_eq!(outcome.changed_files.len(), 12);
    assert!(outcome.changed_files.contains(&"Cargo.lock".to_string()));

    // The post-write tree is consistent at the new version.
    assert_eq!(sync::check(&registry, Some("v0.2.0")).unwrap(), "0.2.0");
}

#[test]
fn set_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.3.0");
    let registry = studio_registry(&dir);

    let before = fs::read_to_string(dir.path().join("server/Cargo.toml")).unwrap();
    let outcome = sync::set(&registry, "0.3.0", None).unwrap();
    assert!(outcome.changed_files.is_empty());

    let after = fs::read_to_string(dir.path().join("server/Cargo.toml")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn set_accepts_v_prefixed_input() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.1.0");

    let outcome = sync::set(&studio_registry(&dir), "v0.2.0", Some("v0.2.0")).unwrap();
    assert_eq!(outcome.version, "0.2.0");
}

#[test]
fn set_rejects_non_semver_input() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.1.0");

    let err = sync::set(&studio_registry(&dir), "0.2", None)
        .unwrap_err()
        .to_string();
    assert!(err.contains("invalid version"), "got: {err}");
}

#[test]
fn set_only_rewrites_files_that_lag_behind() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.2.0");
    // One manifest lags; the rest already carry the target version.
    write(dir.path(), "server/Cargo.toml", &cargo_manifest("opencode-studio", "0.1.9"));

    let outcome = sync::set(&studio_registry(&dir), "0.2.0", None).unwrap();
    assert_eq!(outcome.changed_files, vec!["server/Cargo.toml".to_string()]);
}

#[test]
fn failed_staging_leaves_the_tree_untouched() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.1.0");
    // Corrupt a file that sits late in the registry order; files earlier
    // in the order must still not be written.
    write(dir.path(), "web/package-lock.json", "{ not json");

    let registry = studio_registry(&dir);
    assert!(sync::set(&registry, "0.2.0", None).is_err());

    let manifest = fs::read_to_string(dir.path().join("server/Cargo.toml")).unwrap();
    assert!(manifest.contains("version = \"0.1.0\""));
    let conf = fs::read_to_string(dir.path().join("desktop/src-tauri/tauri.conf.json")).unwrap();
    assert!(conf.contains("\"0.1.0\""));
}

#[test]
fn non_semver_content_is_rejected_at_collect_time() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.1.0");
    write(dir.path(), "web/package.json", &package_json("0"));

    let err = sync::check(&studio_registry(&dir), None)
        .unwrap_err()
        .to_string();
    assert!(err.contains("invalid semver in web/package.json"), "got: {err}");
}

#[test]
fn package_lock_internal_mismatch_fails_before_consistency() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "1.0.0");
    write(dir.path(), "web/package-lock.json", &package_lock("1.0.0", "1.0.1"));

    let err = format!("{:#}", sync::check(&studio_registry(&dir), None).unwrap_err());
    assert!(err.contains("internal mismatch"), "got: {err}");
    assert!(err.contains("web/package-lock.json"), "got: {err}");
    // This is a read failure, not a cross-file report.
    assert!(!err.contains("version mismatch detected across files"));
}

#[test]
fn sourced_lock_block_with_project_name_is_never_selected() {
    let dir = TempDir::new().unwrap();
    // A crates.io dependency shares the project's package name and sits
    // before the project's own sourceless block.
    let lockfile = "[[package]]\n\
                    name = \"studio\"\n\
                    version = \"9.9.9\"\n\
                    source = \"registry+https://github.com/rust-lang/crates.io-index\"\n\
                    \n\
                    [[package]]\n\
                    name = \"studio\"\n\
                    version = \"0.1.0\"\n";
    write(dir.path(), "Cargo.lock", lockfile);
    write(dir.path(), "app/Cargo.toml", &cargo_manifest("studio", "0.1.0"));

    let registry = Registry::new(
        dir.path(),
        vec![
            ManifestEntry::new("app/Cargo.toml", ManifestFormat::CargoPackage),
            ManifestEntry::new(
                "Cargo.lock",
                ManifestFormat::CargoLock {
                    package: "studio".to_string(),
                },
            ),
        ],
    );

    assert_eq!(sync::check(&registry, None).unwrap(), "0.1.0");

    let outcome = sync::set(&registry, "0.2.0", None).unwrap();
    assert_eq!(outcome.version, "0.2.0");

    // The sourced block's version is untouched.
    let updated = fs::read_to_string(dir.path().join("Cargo.lock")).unwrap();
    assert!(updated.contains("version = \"9.9.9\""));
    assert!(updated.contains("version = \"0.2.0\""));
}

#[test]
fn write_then_read_round_trips_across_all_formats() {
    let dir = TempDir::new().unwrap();
    write_studio_tree(dir.path(), "0.1.0");
    let registry = studio_registry(&dir);

    for target in ["0.2.0", "1.0.0-beta.1", "1.0.0"] {
        sync::set(&registry, target, None).unwrap();
        let versions = sync::collect_versions(&registry).unwrap();
        assert!(versions.values().all(|v| v == target), "after set {target}");
    }
}
