//! # JasperRS JasperStarter Interface (`common::jasper`)
//!
//! File: cli/src/common/jasper/mod.rs
//!
//! ## Overview
//!
//! The main interface for driving the external `jasperstarter` tool. Command
//! handlers go through `JasperStarter` for single invocations and through
//! `ReportOrchestrator` for the report-directory workflows.
//!
//! ## Architecture
//!
//! A request flows through the submodules in a fixed order:
//!
//! ```text
//! CommandRequest ─▶ builder ─▶ CommandLine ─▶ escape ─▶ BuiltCommand
//!                                              mode ─▶ BuiltCommand (suffixed)
//!                                   common::process ─▶ output lines / JasperError
//! ```
//!
//! - **`format`**: The output format whitelist.
//! - **`request`**: `Operation`, `CommandRequest`, `ParamValue`, `DbConnection`.
//! - **`builder`**: Pure token-list construction (`CommandBuilder`).
//! - **`escape`**: Shell quoting, applied once when the token list is serialized.
//! - **`mode`**: `ExecutionMode`, its platform resolution, and `BuiltCommand`.
//! - **`report`**: `compile_report` / `process_report` workflows.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::jasper::{ExecutionMode, JasperStarter};
//!
//! # fn run_example() -> Result<()> {
//! let jasper = JasperStarter::setup(None, Some(Path::new("/srv/reports")))?;
//! let command = jasper.compile(Path::new("/srv/reports/sales/index.jrxml"), None)?;
//! println!("{}", command.preview());
//! let mode = jasper.resolve_mode(&ExecutionMode::default());
//! let lines = jasper.execute(command, &mode)?;
//! # Ok(())
//! # }
//! ```
//!
pub mod builder;
pub mod escape;
pub mod format;
pub mod mode;
pub mod report;
pub mod request;

pub use builder::CommandBuilder;
pub use format::OutputFormat;
pub use mode::{BuiltCommand, ExecutionMode, Platform, ResolvedMode};
pub use report::{ReportOrchestrator, ReportRequest};
pub use request::{CommandRequest, DbConnection, Operation, ParamValue, ReportParam};

use crate::common::{process, system};
use crate::core::error::Result;
use std::path::Path;
use tracing::debug;

/// A configured JasperStarter installation.
#[derive(Debug, Clone)]
pub struct JasperStarter {
    builder: CommandBuilder,
    platform: Platform,
}

impl JasperStarter {
    /// Uses `executable` and `resource_dir` as given, without checking either.
    pub fn new(executable: impl AsRef<Path>, resource_dir: impl AsRef<Path>) -> Self {
        Self {
            builder: CommandBuilder::new(executable.as_ref(), resource_dir.as_ref()),
            platform: Platform::current(),
        }
    }

    /// Locates the executable and resolves the resource directory, failing
    /// with `JasperError::Setup` if either is unusable.
    pub fn setup(executable: Option<&Path>, resource_dir: Option<&Path>) -> Result<Self> {
        let executable = system::locate_executable(executable)?;
        let resource_dir = system::resolve_resource_dir(resource_dir)?;
        debug!(
            "JasperStarter at {} with resources in {}",
            executable.display(),
            resource_dir.display()
        );
        Ok(Self::new(executable, resource_dir))
    }

    /// Renders commands for `platform` instead of the host.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn resource_dir(&self) -> &Path {
        self.builder.resource_dir()
    }

    pub fn executable(&self) -> &Path {
        self.builder.executable()
    }

    fn build(&self, operation: Operation, request: &CommandRequest) -> Result<BuiltCommand> {
        let line = self.builder.build(operation, request)?;
        let text = escape::render(&line, self.platform)?;
        Ok(BuiltCommand::new(text))
    }

    /// `jasperstarter compile <input> [-o <output>]`
    pub fn compile(&self, input: &Path, output: Option<&Path>) -> Result<BuiltCommand> {
        let mut request = CommandRequest::new(input);
        request.output = output.map(Path::to_path_buf);
        self.build(Operation::Compile, &request)
    }

    /// `jasperstarter process <input> ...`
    pub fn process(&self, request: &CommandRequest) -> Result<BuiltCommand> {
        self.build(Operation::Process, request)
    }

    /// `jasperstarter list_parameters <input>`
    pub fn list_parameters(&self, input: &Path) -> Result<BuiltCommand> {
        self.build(Operation::ListParameters, &CommandRequest::new(input))
    }

    /// Resolves `mode` against this installation's platform.
    pub fn resolve_mode(&self, mode: &ExecutionMode) -> ResolvedMode {
        mode.resolve(self.platform)
    }

    /// Applies `mode` and runs the command, classifying the exit code.
    pub fn execute(&self, command: BuiltCommand, mode: &ResolvedMode) -> Result<Vec<String>> {
        process::run(command.with_mode(mode.clone())?)
    }
}
