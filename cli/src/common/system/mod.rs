//! # JasperRS System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Setup-time checks against the host: finding the `jasperstarter`
//! executable and resolving the resource directory that holds report
//! subdirectories. Both run once, before any command is built, and fail with
//! `JasperError::Setup`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::system;
//!
//! # fn run_example() -> Result<()> {
//! let exe = system::locate_executable(None)?; // PATH lookup
//! let resources = system::resolve_resource_dir(Some(Path::new("/srv/reports")))?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{JasperError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name looked up on `PATH` when no executable is configured.
pub const DEFAULT_EXECUTABLE: &str = "jasperstarter";

/// Returns the JasperStarter executable to use.
///
/// An explicit path must exist and be executable. Without one, `jasperstarter`
/// is searched for on `PATH`.
pub fn locate_executable(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) => {
            if is_executable(path) {
                debug!("Using configured executable: {}", path.display());
                Ok(path.to_path_buf())
            } else {
                Err(JasperError::Setup(format!(
                    "JasperStarter executable not found, or is not executable (check permissions): '{}'",
                    path.display()
                ))
                .into())
            }
        }
        None => {
            let found = which::which(DEFAULT_EXECUTABLE).map_err(|_| {
                JasperError::Setup(format!(
                    "'{}' was not found on PATH; set --executable, JASPERRS_EXECUTABLE or jasper.executable_path",
                    DEFAULT_EXECUTABLE
                ))
            })?;
            info!("Found {} on PATH: {}", DEFAULT_EXECUTABLE, found.display());
            Ok(found)
        }
    }
}

/// Returns the root directory report names are resolved against.
///
/// An explicit directory must exist; without one, the current working
/// directory is used.
pub fn resolve_resource_dir(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(dir) => Err(JasperError::Setup(format!(
            "Invalid resource directory: '{}'",
            dir.display()
        ))
        .into()),
        None => std::env::current_dir().context("Failed to get current directory"),
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
