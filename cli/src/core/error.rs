//! # JasperRS Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout JasperRS. Every failure
//! a caller can observe, from a misconfigured executable to a report that
//! JasperStarter refused to process, maps onto one `JasperError` variant so it
//! can be matched after the fact.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `JasperError`: A custom error enum using `thiserror` for specific error kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible propagation
//!
//! The error kinds cover:
//! - Setup problems (executable or resource directory misconfigured)
//! - Request validation (missing input, unknown output format, bad parameters)
//! - Report directory checks (not found, not writable)
//! - Execution outcomes (compile output, process output, bare non-zero exit)
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error kind
//! if input.is_empty() {
//!     return Err(JasperError::InputMissing.into());
//! }
//!
//! // Inspect the kind after propagation
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<JasperError>(), Some(JasperError::InvalidFormat(_))) => {
//!         println!("Pick one of: {}", OutputFormat::whitelist());
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for JasperRS.
#[derive(Error, Debug)]
pub enum JasperError {
    /// The JasperStarter executable or the resource directory could not be set up.
    #[error("Setup error: {0}")]
    Setup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("No input file")]
    InputMissing,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Argument cannot be safely escaped: {0}")]
    UnsafeArgument(String),

    /// A report directory or its `index.jrxml` entry file is missing.
    #[error("{0}")]
    ReportNotFound(String),

    #[error("{0}")]
    Permission(String),

    /// A compile step produced output, which JasperStarter only does on failure.
    #[error("Jasper compilation error: {}", .output.join("\n"))]
    Compile { output: Vec<String> },

    /// A process step failed: either a non-zero exit with a diagnostic line,
    /// or a zero exit that still reported something on stdout.
    #[error("{message}")]
    Process {
        message: String,
        output: Vec<String>,
    },

    #[error("Your report has an error and couldn't be processed! Try to output the command using `--print-command` and run it manually in the console. (exit code {exit_code})")]
    GenericExecution { exit_code: i32 },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// `JasperError` values travel inside and can be recovered with `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
