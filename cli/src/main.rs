//! # JasperRS Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the JasperRS CLI, a front end to the JasperStarter
//! command-line report runner. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each top-level command is a variant of the `Commands` enum
//! - Commands map to `handle_*` functions in `commands::`
//! - All errors propagate here, are logged, printed to stderr, and exit with status 1
//!
//! ## Examples
//!
//! ```bash
//! # Compile and render a single template
//! jasperrs compile reports/sales/index.jrxml
//! jasperrs process reports/sales/index.jasper -f pdf xlsx -o out/sales
//!
//! # Work on a report directory under the resource directory
//! jasperrs report compile sales --resource-dir /srv/reports
//!
//! # More logging
//! jasperrs -vv report process sales --print-command
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command definitions and handlers
mod common; // JasperStarter interface, process and filesystem helpers
mod core; // Configuration and error types

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "jasperrs",
    about = "Compile and render JasperReports through JasperStarter",
    long_about = "Build, escape and run jasperstarter command lines.\n\
                  Compiles templates, renders reports into output formats, and manages\n\
                  report directories with subreports.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "c")]
    Compile(commands::compile::CompileArgs),
    #[command(alias = "p")]
    Process(commands::process::ProcessArgs),
    #[command(alias = "list_parameters")]
    ListParameters(commands::list_parameters::ListParametersArgs),
    #[command(alias = "r", about = "Compile or render a report directory")]
    Report(commands::report::ReportArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Compile(args) => commands::compile::handle_compile(args),
        Commands::Process(args) => commands::process::handle_process(args),
        Commands::ListParameters(args) => {
            commands::list_parameters::handle_list_parameters(args)
        }
        Commands::Report(args) => commands::report::handle_report(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
