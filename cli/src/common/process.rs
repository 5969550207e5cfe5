//! # JasperRS Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Runs a `BuiltCommand` through the host shell (`sh -c` on Unix, `cmd /C` on
//! Windows), blocks until the shell exits, and reports what happened.
//!
//! ## Architecture
//!
//! - **`execute`**: spawns the shell, collects stdout line by line together
//!   with the exit code into an `ExecutionResult`. Never fails because of the
//!   exit code itself.
//! - **`run`**: `execute` plus classification. Exit code 0 yields the output
//!   lines; a non-zero exit becomes `JasperError::Process` carrying the first
//!   output line, or `JasperError::GenericExecution` when nothing was printed.
//!
//! Stderr is captured separately. Unless the command redirected it into stdout
//! (`2>&1`), it is only logged and never counted as output. There is no retry
//! and no timeout: a hung JasperStarter blocks the caller.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process;
//!
//! # fn run_example(cmd: BuiltCommand) -> Result<()> {
//! let lines = process::run(cmd)?;
//! for line in lines {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::common::jasper::BuiltCommand;
use crate::core::error::{JasperError, Result};
use anyhow::Context;
use std::process::Command;
use tracing::{debug, info, warn};

/// Exit status and stdout lines of one finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub output_lines: Vec<String>,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Maps a non-zero exit onto the matching `JasperError`.
    pub fn into_lines(self) -> Result<Vec<String>> {
        if self.success() {
            return Ok(self.output_lines);
        }
        match self.output_lines.first() {
            Some(first) => Err(JasperError::Process {
                message: first.clone(),
                output: self.output_lines,
            }
            .into()),
            None => Err(JasperError::GenericExecution {
                exit_code: self.exit_code,
            }
            .into()),
        }
    }
}

#[cfg(windows)]
fn shell_command(text: &str) -> Command {
    use std::os::windows::process::CommandExt;

    // `arg` would re-quote the line for argv parsing; cmd needs it verbatim.
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").raw_arg(text);
    cmd
}

#[cfg(not(windows))]
fn shell_command(text: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", text]);
    cmd
}

/// Runs `command` to completion and captures its stdout lines and exit code.
pub fn execute(command: BuiltCommand) -> Result<ExecutionResult> {
    let text = command.into_text();
    info!("Executing: {}", text);

    let output = shell_command(&text)
        .output()
        .with_context(|| format!("Failed to spawn shell for command: {}", text))?;

    // Killed by a signal: there is no exit code to report.
    let exit_code = output.status.code().unwrap_or(-1);
    let output_lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        warn!("Command wrote to stderr:\n{}", stderr.trim_end());
    }
    debug!(
        "Command finished: exit_code={}, {} output line(s)",
        exit_code,
        output_lines.len()
    );

    Ok(ExecutionResult {
        exit_code,
        output_lines,
    })
}

/// Runs `command` and classifies the outcome by exit code.
pub fn run(command: BuiltCommand) -> Result<Vec<String>> {
    execute(command)?.into_lines()
}
