//! # Report Workflows
//!
//! File: cli/src/common/jasper/report.rs
//!
//! ## Overview
//!
//! Report directories live under the resource directory, one per report:
//!
//! ```text
//! <resource_dir>/<report>/index.jrxml     entry template (required)
//! <resource_dir>/<report>/<sub>.jrxml     subreport templates
//! <resource_dir>/<report>/*.jasper        compiled artifacts
//! ```
//!
//! `compile_report` compiles every template of one directory and
//! `process_report` renders the compiled `index.jasper`. Both run
//! validate → build → execute → interpret with no retries.
//!
//! JasperStarter can exit 0 while printing errors, so both workflows treat
//! *any* output as failure. That rule lives here rather than in
//! `common::process`, which only looks at exit codes.
//!
use super::{
    BuiltCommand, CommandRequest, DbConnection, ExecutionMode, JasperStarter, ParamValue,
    ResolvedMode,
};
use crate::common::fs::io;
use crate::core::error::{JasperError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Entry template every report directory must contain.
pub const INDEX_TEMPLATE: &str = "index.jrxml";
/// Compiled entry point rendered by `process_report`.
pub const INDEX_COMPILED: &str = "index.jasper";

const TEMPLATE_EXTENSION: &str = "jrxml";
const COMPILED_EXTENSION: &str = "jasper";

/// What to render a report into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportRequest {
    pub output: Option<PathBuf>,
    pub formats: Vec<String>,
    pub parameters: BTreeMap<String, ParamValue>,
    pub db_connection: Option<DbConnection>,
}

/// Runs report-directory workflows with one resolved execution mode.
pub struct ReportOrchestrator<'a> {
    jasper: &'a JasperStarter,
    mode: ResolvedMode,
}

impl<'a> ReportOrchestrator<'a> {
    pub fn new(jasper: &'a JasperStarter, mode: &ExecutionMode) -> Self {
        Self {
            jasper,
            mode: jasper.resolve_mode(mode),
        }
    }

    pub fn report_dir(&self, name: &str) -> PathBuf {
        self.jasper.resource_dir().join(name)
    }

    /// Compiles every `.jrxml` in the report directory, main report and subreports.
    ///
    /// Validation happens before anything is touched: the directory must exist,
    /// be writable, and contain `index.jrxml`. The batch stops at the first
    /// template that fails.
    pub fn compile_report(&self, name: &str) -> Result<()> {
        let report_dir = self.report_dir(name);
        info!("Compiling report '{}' in {}", name, report_dir.display());

        if !report_dir.is_dir() {
            return Err(JasperError::ReportNotFound(format!(
                "Report directory does not exist: '{}'",
                report_dir.display()
            ))
            .into());
        }
        if !io::is_writable(&report_dir) {
            return Err(JasperError::Permission(format!(
                "Report directory is not writable: '{}'",
                report_dir.display()
            ))
            .into());
        }
        let index = report_dir.join(INDEX_TEMPLATE);
        if !index.is_file() {
            return Err(JasperError::ReportNotFound(format!(
                "Report index file does not exist: '{}'",
                index.display()
            ))
            .into());
        }

        let templates = io::list_files_with_extension(&report_dir, TEMPLATE_EXTENSION)?;
        let subreport_names: Vec<String> = templates
            .iter()
            .filter_map(|t| t.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect();

        // Every file the batch will touch is checked before the first one is.
        for template in &templates {
            check_writable_artifacts(template)?;
        }

        for template in &templates {
            let base = template.with_extension("");
            remove_stale_artifact(&template.with_extension(COMPILED_EXTENSION))?;
            replace_subreport_links(template, &subreport_names)?;

            let command = self.jasper.compile(template, Some(&base))?;
            let output = self.jasper.execute(command, &self.mode)?;
            if !output.is_empty() {
                return Err(JasperError::Compile { output }.into());
            }
            debug!("Compiled {}", template.display());
        }
        info!("Compiled {} template(s) for '{}'", templates.len(), name);
        Ok(())
    }

    /// The `process` command `process_report` would run, without running it.
    pub fn process_report_command(&self, name: &str, request: ReportRequest) -> Result<BuiltCommand> {
        let report_dir = self.report_dir(name);
        let command_request = CommandRequest {
            input: report_dir.join(INDEX_COMPILED),
            output: request.output,
            formats: request.formats,
            parameters: request.parameters,
            db_connection: request.db_connection,
            resource_dir: Some(report_dir),
        };
        self.jasper.process(&command_request)
    }

    /// Renders `<resource_dir>/<name>/index.jasper`, using the report
    /// directory as the resource directory. Any output is a failure, even on exit 0.
    pub fn process_report(&self, name: &str, request: ReportRequest) -> Result<()> {
        info!("Processing report '{}'", name);
        let command = self.process_report_command(name, request)?;
        let output = self.jasper.execute(command, &self.mode)?;
        if !output.is_empty() {
            return Err(JasperError::Process {
                message: format!("Could not process report ({}): {}", name, output.join("\n")),
                output,
            }
            .into());
        }
        Ok(())
    }
}

fn check_writable_artifacts(template: &Path) -> Result<()> {
    if !io::is_writable(template) {
        return Err(JasperError::Permission(format!(
            "could not rewrite template, check permissions: '{}'",
            template.display()
        ))
        .into());
    }
    let compiled = template.with_extension(COMPILED_EXTENSION);
    if compiled.exists() && !io::is_writable(&compiled) {
        return Err(JasperError::Permission(format!(
            "could not remove compiled file, check permissions: '{}'",
            compiled.display()
        ))
        .into());
    }
    Ok(())
}

fn remove_stale_artifact(compiled: &Path) -> Result<()> {
    if compiled.exists() {
        io::remove_file(compiled)?;
    }
    Ok(())
}

/// Points `<name>.jrxml` references at `<name>.jasper` for every given name.
pub fn rewrite_subreport_links(text: &str, names: &[String]) -> String {
    names.iter().fold(text.to_string(), |acc, name| {
        acc.replace(
            &format!("{}.{}", name, TEMPLATE_EXTENSION),
            &format!("{}.{}", name, COMPILED_EXTENSION),
        )
    })
}

/// Rewrites subreport links in `path` in place. Returns whether the file changed.
pub fn replace_subreport_links(path: &Path, names: &[String]) -> Result<bool> {
    let original = io::read_file_to_string(path)?;
    let rewritten = rewrite_subreport_links(&original, names);
    if rewritten == original {
        return Ok(false);
    }
    io::write_string_to_file(path, &rewritten)?;
    debug!("Rewrote subreport links in {}", path.display());
    Ok(true)
}
