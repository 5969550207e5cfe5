//! # JasperRS Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used by the report workflows. Everything lives in the
//! `io` submodule; import from there, e.g.
//! `use crate::common::fs::io::list_files_with_extension;`.
//!

/// Writability checks, single-extension listing, read/write and removal.
pub mod io;
