//! Release tooling for the studio monorepo.
//!
//! Two binaries share this library: `version-sync`, which keeps the
//! version recorded in the server/web/desktop manifests in agreement,
//! and `assert-native-target`, which guards release builds against
//! cross-compiling for the wrong platform. Modules are public so
//! integration tests can exercise them directly.

pub mod cargo_lock;
pub mod cargo_toml;
pub mod config;
pub mod json_manifest;
pub mod line_edit;
pub mod output;
pub mod package_lock;
pub mod registry;
pub mod sync;
pub mod target;
pub mod version;
