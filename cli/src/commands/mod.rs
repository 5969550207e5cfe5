//! # JasperRS Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level commands of the JasperRS CLI. Each module defines a clap
//! arguments struct and a `handle_*` function that `main.rs` dispatches to.
//!
//! ## Command Groups
//!
//! - `compile`: compile a single `.jrxml` template
//! - `process`: render a single report into output formats
//! - `list_parameters`: list the parameters a report declares
//! - `report`: compile or render a whole report directory
//!
//! `args` holds the argument groups the commands share (installation,
//! execution mode, render options and datasource).
//!

/// Argument groups flattened into several commands.
pub mod args;
/// `jasperrs compile`.
pub mod compile;
/// `jasperrs list-parameters`.
pub mod list_parameters;
/// `jasperrs process`.
pub mod process;
/// `jasperrs report compile|process`.
pub mod report;
