//! # JasperRS Report Compile
//!
//! File: cli/src/commands/report/compile.rs
//!
//! ## Overview
//!
//! Implements `jasperrs report compile <NAME>`. The report directory must
//! exist, be writable, and contain `index.jrxml`; otherwise nothing is
//! touched. Each template's stale `.jasper` is removed, its subreport
//! references are rewritten, and it is compiled. The first template that
//! produces output stops the batch.
//!
//! ## Usage
//!
//! ```bash
//! jasperrs report compile sales
//! jasperrs report compile sales --resource-dir /srv/reports
//! ```
//!
use crate::commands::args::{ExecArgs, JasperArgs};
use crate::common::jasper::ReportOrchestrator;
use crate::core::{config, error::Result};
use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

/// Arguments for `jasperrs report compile`.
#[derive(Parser, Debug)]
#[command(about = "Compile every template of a report directory")]
pub struct ReportCompileArgs {
    /// Report directory name, relative to the resource directory.
    #[arg(required = true, value_name = "NAME")]
    name: String,

    #[command(flatten)]
    jasper: JasperArgs,

    #[command(flatten)]
    exec: ExecArgs,
}

pub fn handle_compile(args: ReportCompileArgs) -> Result<()> {
    info!("Handling report compile command...");
    debug!("Report compile args: {:?}", args);

    // One command per template, so there is no single command to print.
    if args.exec.print_command {
        anyhow::bail!("--print-command is not supported by 'report compile'");
    }
    let cfg = config::load_config().context("Failed to load JasperRS configuration")?;
    let jasper = args.jasper.connect(&cfg)?;
    let orchestrator = ReportOrchestrator::new(&jasper, &args.exec.mode(&cfg));
    orchestrator.compile_report(&args.name)?;
    println!("Report '{}' compiled.", args.name);
    Ok(())
}
