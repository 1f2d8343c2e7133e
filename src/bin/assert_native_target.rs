//! Assert that a target triple matches the machine running the build.

use clap::Parser;
use std::process;

use studio_release_tools::output;
use studio_release_tools::target::{HostInfo, validate_target};

/// Assert that a target triple matches the native runner OS and architecture.
#[derive(Parser, Debug)]
#[command(name = "assert-native-target", version, about)]
struct Cli {
    /// Rust target triple, e.g. aarch64-unknown-linux-gnu.
    target: String,
}

fn main() {
    let cli = Cli::parse();
    let host = HostInfo::current();

    let errors = validate_target(&cli.target, &host);
    if !errors.is_empty() {
        for message in &errors {
            output::fail("ERROR:", message);
        }
        process::exit(1);
    }

    output::success(
        "OK:",
        &format!(
            "native target validation passed ({} on {}/{})",
            cli.target, host.os, host.arch
        ),
    );
}
