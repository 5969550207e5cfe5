//! # JasperRS CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! is compiled as its own crate and pulls this module in with `mod common;`.
//!
//! Commands run with `HOME`, `XDG_CONFIG_HOME` and the working directory
//! pointed at a scratch directory, so a developer's own configuration never
//! leaks into a test. `jasperstarter` itself is replaced by a small shell
//! script that records its arguments.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// A `jasperrs` command isolated from the caller's environment and configuration.
pub fn jasperrs_cmd(sandbox: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jasperrs").expect("Failed to find jasperrs binary for testing");
    cmd.current_dir(sandbox)
        .env("HOME", sandbox)
        .env("XDG_CONFIG_HOME", sandbox.join(".config"))
        .env_remove("JASPERRS_EXECUTABLE")
        .env_remove("JASPERRS_RESOURCE_DIR")
        .env_remove("JASPERRS_DB_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes an executable stand-in for `jasperstarter` into `dir`.
///
/// The script appends its arguments to `dir/calls.log` and then runs `body`.
#[cfg(unix)]
pub fn fake_jasperstarter(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("jasperstarter");
    let log = dir.join("calls.log");
    fs::write(
        &script,
        format!("#!/bin/sh\necho \"$@\" >> '{}'\n{}\n", log.display(), body),
    )
    .expect("Failed to write fake jasperstarter");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake jasperstarter executable");
    script
}

/// Lines recorded by `fake_jasperstarter`, or none if it never ran.
pub fn recorded_calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls.log"))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Creates `<root>/<name>/` holding the given `(file name, content)` templates.
pub fn report_dir(root: &Path, name: &str, templates: &[(&str, &str)]) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("Failed to create report directory");
    for (file, content) in templates {
        fs::write(dir.join(file), content).expect("Failed to write template");
    }
    dir
}
