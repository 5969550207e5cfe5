//! # JasperRS List Parameters Command
//!
//! File: cli/src/commands/list_parameters.rs
//!
//! ## Overview
//!
//! Implements `jasperrs list-parameters` (alias `list_parameters`), which asks
//! jasperstarter for the parameters a compiled report declares and prints
//! them as-is, one line per parameter.
//!
//! ## Usage
//!
//! ```bash
//! jasperrs list-parameters reports/sales/index.jasper
//! ```
//!
use super::args::{self, ExecArgs, JasperArgs};
use crate::core::{config, error::Result};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// Arguments for `jasperrs list-parameters`.
#[derive(Parser, Debug)]
#[command(about = "List the parameters declared by a compiled report")]
pub struct ListParametersArgs {
    /// The compiled `.jasper` report (or `.jrxml` template) to inspect.
    #[arg(required = true, value_name = "INPUT")]
    input: PathBuf,

    #[command(flatten)]
    jasper: JasperArgs,

    #[command(flatten)]
    exec: ExecArgs,
}

/// Handles `jasperrs list-parameters`.
pub fn handle_list_parameters(args: ListParametersArgs) -> Result<()> {
    info!("Handling list-parameters command...");
    debug!("List-parameters args: {:?}", args);

    let cfg = config::load_config().context("Failed to load JasperRS configuration")?;
    let jasper = args.jasper.connect(&cfg)?;
    let command = jasper.list_parameters(&args.input)?;
    args::run_or_print(&jasper, command, &args.exec, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_parameters_args_parsing() {
        let args = ListParametersArgs::try_parse_from([
            "list-parameters",
            "sales/index.jasper",
            "--foreground",
        ])
        .unwrap();
        assert_eq!(args.input, PathBuf::from("sales/index.jasper"));
        assert!(args.exec.foreground);
    }
}
