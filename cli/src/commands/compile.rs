//! # JasperRS Compile Command
//!
//! File: cli/src/commands/compile.rs
//!
//! ## Overview
//!
//! Implements `jasperrs compile`, which compiles a single `.jrxml` template
//! into a `.jasper` file via `jasperstarter compile`. Whatever jasperstarter
//! prints is echoed to stdout; a non-zero exit code is reported as an error.
//!
//! For compiling every template of a report directory at once, with subreport
//! links rewritten, see `jasperrs report compile`.
//!
//! ## Usage
//!
//! ```bash
//! jasperrs compile reports/sales/index.jrxml
//! jasperrs compile reports/sales/index.jrxml -o build/sales
//! jasperrs compile reports/sales/index.jrxml --print-command
//! ```
//!
use super::args::{self, ExecArgs, JasperArgs};
use crate::core::{config, error::Result};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// Arguments for `jasperrs compile`.
#[derive(Parser, Debug)]
#[command(about = "Compile a .jrxml template into a .jasper file")]
pub struct CompileArgs {
    /// The `.jrxml` template to compile.
    #[arg(required = true, value_name = "INPUT")]
    input: PathBuf,

    /// Output file base name (without extension) or directory.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    #[command(flatten)]
    jasper: JasperArgs,

    #[command(flatten)]
    exec: ExecArgs,
}

/// Handles `jasperrs compile`.
pub fn handle_compile(args: CompileArgs) -> Result<()> {
    info!("Handling compile command...");
    debug!("Compile args: {:?}", args);

    let cfg = config::load_config().context("Failed to load JasperRS configuration")?;
    let jasper = args.jasper.connect(&cfg)?;
    let command = jasper.compile(&args.input, args.output.as_deref())?;
    args::run_or_print(&jasper, command, &args.exec, &cfg)
}
