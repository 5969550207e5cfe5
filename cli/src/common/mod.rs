//! # JasperRS Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared functionality used by the command handlers, kept apart from
//! argument parsing (`commands::`) and from configuration and error types
//! (`core::`).
//!
//! ## Architecture
//!
//! - **`fs`**: Filesystem helpers for report directories (listing templates, rewriting them, removing artifacts).
//! - **`jasper`**: The JasperStarter interface: request types, command construction, shell escaping, execution modes and the report workflows.
//! - **`process`**: Runs a built command line through the platform shell and classifies its exit status.
//! - **`system`**: Locates the `jasperstarter` executable and the resource directory.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::jasper::{ExecutionMode, JasperStarter, ReportOrchestrator};
//!
//! # fn run_example() -> Result<()> {
//! let jasper = JasperStarter::setup(None, None)?;
//! ReportOrchestrator::new(&jasper, &ExecutionMode::default()).compile_report("sales")?;
//! # Ok(())
//! # }
//! ```
//!
pub mod fs;
pub mod jasper;
pub mod process;
pub mod system;
