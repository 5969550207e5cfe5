//! # JasperRS Process Command
//!
//! File: cli/src/commands/process.rs
//!
//! ## Overview
//!
//! Implements `jasperrs process`, which renders a compiled report (or a
//! template, which jasperstarter compiles on the fly) into one or more output
//! formats. Formats are checked against the supported whitelist and parameter
//! names against the allowed character set before anything is executed.
//!
//! ## Usage
//!
//! ```bash
//! jasperrs process reports/sales/index.jasper -o out/sales -f pdf xlsx
//! jasperrs process reports/sales/index.jasper -P year=2024 -P 'title=Q1 Sales'
//! jasperrs process reports/sales/index.jasper --connection warehouse
//! jasperrs process reports/sales/index.jasper --db-type csv --data-file data.csv
//! ```
//!
//! Resources (images, subreports) are looked up in `-r DIR` when given and in
//! the configured resource directory otherwise.
//!
use super::args::{self, DbArgs, ExecArgs, JasperArgs, RenderArgs};
use crate::common::jasper::CommandRequest;
use crate::core::{config, error::Result};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// Arguments for `jasperrs process`.
#[derive(Parser, Debug)]
#[command(about = "Render a report into one or more output formats")]
pub struct ProcessArgs {
    /// The `.jasper` report (or `.jrxml` template) to render.
    #[arg(required = true, value_name = "INPUT")]
    input: PathBuf,

    /// Resource directory for this report (jasperstarter `-r`).
    #[arg(short = 'r', long = "resources", value_name = "DIR")]
    resources: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(flatten)]
    db: DbArgs,

    #[command(flatten)]
    jasper: JasperArgs,

    #[command(flatten)]
    exec: ExecArgs,
}

/// Handles `jasperrs process`.
pub fn handle_process(args: ProcessArgs) -> Result<()> {
    info!("Handling process command...");
    debug!("Process args: {:?}", args);

    let cfg = config::load_config().context("Failed to load JasperRS configuration")?;
    let jasper = args.jasper.connect(&cfg)?;

    let request = CommandRequest {
        input: args.input.clone(),
        output: args.render.output.clone(),
        formats: args.render.formats.clone(),
        parameters: args.render.parameters(),
        db_connection: args.db.resolve(&cfg)?,
        resource_dir: args.resources.clone(),
    };
    let command = jasper.process(&request)?;
    args::run_or_print(&jasper, command, &args.exec, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::jasper::ParamValue;

    #[test]
    fn test_process_args_parsing() {
        let args = ProcessArgs::try_parse_from([
            "process",
            "sales/index.jasper",
            "-o",
            "out/sales",
            "-f",
            "pdf",
            "xlsx",
            "-r",
            "sales",
            "-P",
            "year=2024",
            "--db-type",
            "csv",
            "--data-file",
            "data.csv",
        ])
        .unwrap();
        assert_eq!(args.input, PathBuf::from("sales/index.jasper"));
        assert_eq!(args.resources, Some(PathBuf::from("sales")));
        assert_eq!(args.render.output, Some(PathBuf::from("out/sales")));
        assert_eq!(args.render.formats, ["pdf", "xlsx"]);
        assert_eq!(args.render.parameters()["year"], ParamValue::Int(2024));
        assert_eq!(args.db.driver.as_deref(), Some("csv"));
        assert_eq!(args.db.data_file.as_deref(), Some("data.csv"));
    }
}
