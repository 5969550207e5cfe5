//! # JasperRS Report Command Group
//!
//! File: cli/src/commands/report/mod.rs
//!
//! ## Overview
//!
//! `jasperrs report` works on report *directories* under the resource
//! directory rather than on single files:
//!
//! - `report compile <NAME>`: compiles every `.jrxml` in `<resource_dir>/<NAME>`,
//!   pointing subreport references at their compiled `.jasper` files first.
//! - `report process <NAME>`: renders `<resource_dir>/<NAME>/index.jasper`
//!   with the report directory as its resource directory.
//!
//! Unlike the single-file commands, both treat any jasperstarter output as a
//! failure, since jasperstarter reports many errors with exit code 0.
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};

/// Implements `jasperrs report compile`.
mod compile;
/// Implements `jasperrs report process`.
mod process;

/// Arguments for the `jasperrs report` group.
#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    command: ReportCommand,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Compile all templates of a report directory.
    Compile(compile::ReportCompileArgs),
    /// Render a compiled report directory.
    Process(process::ReportProcessArgs),
}

/// Dispatches `jasperrs report <subcommand>`.
pub fn handle_report(args: ReportArgs) -> Result<()> {
    match args.command {
        ReportCommand::Compile(args) => compile::handle_compile(args)?,
        ReportCommand::Process(args) => process::handle_process(args)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_subcommands_parse() {
        let args = ReportArgs::try_parse_from(["report", "compile", "sales"]).unwrap();
        assert!(matches!(args.command, ReportCommand::Compile(_)));

        let args = ReportArgs::try_parse_from(["report", "process", "sales", "-f", "csv"]).unwrap();
        assert!(matches!(args.command, ReportCommand::Process(_)));

        assert!(ReportArgs::try_parse_from(["report"]).is_err());
    }
}
