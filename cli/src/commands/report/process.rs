//! # JasperRS Report Process
//!
//! File: cli/src/commands/report/process.rs
//!
//! ## Overview
//!
//! Implements `jasperrs report process <NAME>`, rendering
//! `<resource_dir>/<NAME>/index.jasper` with `<resource_dir>/<NAME>` as the
//! jasperstarter resource directory. Run `report compile` first.
//!
//! ## Usage
//!
//! ```bash
//! jasperrs report process sales -o out/sales -f pdf xlsx -P year=2024
//! jasperrs report process sales --connection warehouse --print-command
//! ```
//!
use crate::commands::args::{DbArgs, ExecArgs, JasperArgs, RenderArgs};
use crate::common::jasper::{ReportOrchestrator, ReportRequest};
use crate::core::{config, error::Result};
use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

/// Arguments for `jasperrs report process`.
#[derive(Parser, Debug)]
#[command(about = "Render a compiled report directory")]
pub struct ReportProcessArgs {
    /// Report directory name, relative to the resource directory.
    #[arg(required = true, value_name = "NAME")]
    name: String,

    #[command(flatten)]
    render: RenderArgs,

    #[command(flatten)]
    db: DbArgs,

    #[command(flatten)]
    jasper: JasperArgs,

    #[command(flatten)]
    exec: ExecArgs,
}

pub fn handle_process(args: ReportProcessArgs) -> Result<()> {
    info!("Handling report process command...");
    debug!("Report process args: {:?}", args);

    let cfg = config::load_config().context("Failed to load JasperRS configuration")?;
    let jasper = args.jasper.connect(&cfg)?;
    let request = ReportRequest {
        output: args.render.output.clone(),
        formats: args.render.formats.clone(),
        parameters: args.render.parameters(),
        db_connection: args.db.resolve(&cfg)?,
    };

    let orchestrator = ReportOrchestrator::new(&jasper, &args.exec.mode(&cfg));
    if args.exec.print_command {
        let command = orchestrator.process_report_command(&args.name, request)?;
        println!("{}", command.preview());
        return Ok(());
    }
    orchestrator.process_report(&args.name, request)?;
    println!("Report '{}' processed.", args.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_process_args_parsing() {
        let args = ReportProcessArgs::try_parse_from([
            "process",
            "sales",
            "--connection",
            "warehouse",
            "-P",
            "title=\"2024\"",
        ])
        .unwrap();
        assert_eq!(args.name, "sales");
        assert_eq!(args.render.formats, ["pdf"]);
        assert_eq!(args.db.connection.as_deref(), Some("warehouse"));
        assert_eq!(
            args.render.parameters()["title"],
            crate::common::jasper::ParamValue::Str("2024".into())
        );
    }
}
