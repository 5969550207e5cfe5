//! # JasperStarter Command Builder
//!
//! File: cli/src/common/jasper/builder.rs
//!
//! ## Overview
//!
//! Turns an `Operation` plus a `CommandRequest` into a `CommandLine`: an
//! ordered list of discrete tokens. Nothing is quoted or joined here; that
//! happens once, in `escape::render`, so a value containing spaces or shell
//! metacharacters can never bleed into a neighbouring argument.
//!
//! ## Token order
//!
//! ```text
//! <exe> compile <input> [-o <output>]
//! <exe> process <input> [-o <output>] -f <fmt>... -r <dir> [-P k=v ...] [-t <driver> ...]
//! <exe> list_parameters <input>
//! ```
//!
use super::format::OutputFormat;
use super::request::{validate_param_name, CommandRequest, DbConnection, Operation, ParamValue};
use crate::core::error::{JasperError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single command-line token.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A plain word, quoted as needed at render time.
    Word(String),
    /// A report parameter, rendered as `name="value"` or `name=value`.
    Param { name: String, value: ParamValue },
}

impl Arg {
    fn word(s: impl Into<String>) -> Self {
        Arg::Word(s.into())
    }

    fn path(p: &Path) -> Self {
        Arg::Word(p.to_string_lossy().into_owned())
    }
}

/// A fully assembled but not yet escaped invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLine {
    pub operation: Operation,
    pub args: Vec<Arg>,
}

/// Builds jasperstarter invocations for one executable and default resource directory.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    executable: PathBuf,
    resource_dir: PathBuf,
}

impl CommandBuilder {
    pub fn new(executable: impl Into<PathBuf>, resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            resource_dir: resource_dir.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    /// Builds the token list for `operation`. Fails without producing a partial
    /// command if the input is empty, a format is unknown, or a parameter is invalid.
    pub fn build(&self, operation: Operation, request: &CommandRequest) -> Result<CommandLine> {
        if request.input.as_os_str().is_empty() {
            return Err(JasperError::InputMissing.into());
        }

        let mut args = vec![
            Arg::path(&self.executable),
            Arg::word(operation.keyword()),
            Arg::path(&request.input),
        ];

        match operation {
            Operation::Compile => push_output(&mut args, request),
            Operation::Process => {
                // Validate everything up front so no partial command escapes.
                let formats = validate_formats(&request.formats)?;
                for name in request.parameters.keys() {
                    validate_param_name(name)?;
                }

                push_output(&mut args, request);

                args.push(Arg::word("-f"));
                args.extend(formats.iter().map(|f| Arg::word(f.as_str())));

                let resource_dir = request
                    .resource_dir
                    .as_deref()
                    .unwrap_or(self.resource_dir.as_path());
                args.push(Arg::word("-r"));
                args.push(Arg::path(resource_dir));

                if !request.parameters.is_empty() {
                    args.push(Arg::word("-P"));
                    args.extend(request.parameters.iter().map(|(name, value)| Arg::Param {
                        name: name.clone(),
                        value: value.clone(),
                    }));
                }

                if let Some(connection) = &request.db_connection {
                    push_db_connection(&mut args, connection)?;
                }
            }
            Operation::ListParameters => {}
        }

        let line = CommandLine { operation, args };
        debug!("Built {} command with {} tokens", operation, line.args.len());
        Ok(line)
    }
}

fn push_output(args: &mut Vec<Arg>, request: &CommandRequest) {
    if let Some(output) = &request.output {
        args.push(Arg::word("-o"));
        args.push(Arg::path(output));
    }
}

/// Parses every requested format, keeping first-seen order and dropping repeats.
fn validate_formats(raw: &[String]) -> Result<Vec<OutputFormat>> {
    if raw.is_empty() {
        return Err(JasperError::InvalidFormat(
            "at least one output format is required".to_string(),
        )
        .into());
    }
    let mut formats = Vec::with_capacity(raw.len());
    for name in raw {
        let format: OutputFormat = name.parse()?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    Ok(formats)
}

fn push_db_connection(args: &mut Vec<Arg>, db: &DbConnection) -> Result<()> {
    if db.driver.trim().is_empty() {
        return Err(JasperError::InvalidParameter(
            "a database connection requires a driver".to_string(),
        )
        .into());
    }
    args.push(Arg::word("-t"));
    args.push(Arg::word(db.driver.as_str()));

    let port = db.port.map(|p| p.to_string());
    let optional = [
        ("-u", db.username.as_deref()),
        ("-p", db.password.as_deref()),
        ("-H", db.host.as_deref()),
        ("-n", db.database.as_deref()),
        ("--db-port", port.as_deref()),
        ("--db-driver", db.jdbc_driver.as_deref()),
        ("--db-url", db.jdbc_url.as_deref()),
        ("--jdbc-dir", db.jdbc_dir.as_deref()),
        ("--db-sid", db.db_sid.as_deref()),
        ("--json-query", db.json_query.as_deref()),
        ("--data-file", db.data_file.as_deref()),
    ];
    for (flag, value) in optional {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            args.push(Arg::word(flag));
            args.push(Arg::word(value));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> CommandBuilder {
        CommandBuilder::new("/opt/jasperstarter/bin/jasperstarter", "/srv/reports")
    }

    /// Flattens tokens into plain strings for easy comparison.
    fn words(line: &CommandLine) -> Vec<String> {
        line.args
            .iter()
            .map(|arg| match arg {
                Arg::Word(w) => w.clone(),
                Arg::Param { name, value } => format!("{}={}", name, value),
            })
            .collect()
    }

    fn kind(err: &anyhow::Error) -> &JasperError {
        err.downcast_ref::<JasperError>().expect("expected a JasperError")
    }

    #[test]
    fn test_compile_with_and_without_output() {
        let line = builder()
            .build(Operation::Compile, &CommandRequest::new("/r/a.jrxml"))
            .unwrap();
        assert_eq!(
            words(&line),
            ["/opt/jasperstarter/bin/jasperstarter", "compile", "/r/a.jrxml"]
        );

        let line = builder()
            .build(
                Operation::Compile,
                &CommandRequest::new("/r/a.jrxml").output("/r/a"),
            )
            .unwrap();
        assert_eq!(words(&line)[3..], ["-o", "/r/a"]);
    }

    #[test]
    fn test_list_parameters_ignores_process_options() {
        let request = CommandRequest::new("/r/a.jasper")
            .output("/tmp/out")
            .formats(["bogus"]);
        let line = builder().build(Operation::ListParameters, &request).unwrap();
        assert_eq!(
            words(&line),
            [
                "/opt/jasperstarter/bin/jasperstarter",
                "list_parameters",
                "/r/a.jasper"
            ]
        );
    }

    #[test]
    fn test_empty_input_rejected_for_every_operation() {
        for op in [Operation::Compile, Operation::Process, Operation::ListParameters] {
            let err = builder()
                .build(op, &CommandRequest::new("").formats(["pdf"]))
                .unwrap_err();
            assert!(matches!(kind(&err), JasperError::InputMissing), "{op}");
        }
    }

    #[test]
    fn test_process_clause_order() {
        let request = CommandRequest::new("/srv/reports/sales/index.jasper")
            .output("/tmp/sales")
            .formats(["pdf", "xlsx", "pdf"])
            .parameter("year", ParamValue::Int(2024))
            .parameter("title", ParamValue::Str("Q1".into()));
        let line = builder().build(Operation::Process, &request).unwrap();
        assert_eq!(line.operation, Operation::Process);
        assert_eq!(
            words(&line),
            [
                "/opt/jasperstarter/bin/jasperstarter",
                "process",
                "/srv/reports/sales/index.jasper",
                "-o",
                "/tmp/sales",
                "-f",
                "pdf",
                "xlsx",
                "-r",
                "/srv/reports",
                "-P",
                "title=Q1",
                "year=2024",
            ]
        );
    }

    #[test]
    fn test_process_resource_dir_override() {
        let request = CommandRequest::new("in.jasper")
            .formats(["csv"])
            .resource_dir("/elsewhere");
        let line = builder().build(Operation::Process, &request).unwrap();
        assert_eq!(words(&line)[3..], ["-f", "csv", "-r", "/elsewhere"]);
    }

    #[test]
    fn test_every_whitelisted_format_builds() {
        for format in OutputFormat::ALL {
            let request = CommandRequest::new("in.jasper").formats([format.as_str()]);
            assert!(builder().build(Operation::Process, &request).is_ok());
        }
        let all = CommandRequest::new("in.jasper").formats(OutputFormat::ALL.map(|f| f.as_str()));
        assert!(builder().build(Operation::Process, &all).is_ok());
    }

    #[test]
    fn test_invalid_or_missing_format_rejected() {
        let request = CommandRequest::new("in.jasper").formats(["pdf", "docm"]);
        let err = builder().build(Operation::Process, &request).unwrap_err();
        assert!(matches!(kind(&err), JasperError::InvalidFormat(_)));

        let request = CommandRequest::new("in.jasper");
        let err = builder().build(Operation::Process, &request).unwrap_err();
        assert!(matches!(kind(&err), JasperError::InvalidFormat(_)));
    }

    #[test]
    fn test_invalid_parameter_name_rejected() {
        let request = CommandRequest::new("in.jasper")
            .formats(["pdf"])
            .parameter("x; rm -rf /", ParamValue::Int(1));
        let err = builder().build(Operation::Process, &request).unwrap_err();
        assert!(matches!(kind(&err), JasperError::InvalidParameter(_)));
    }

    #[test]
    fn test_db_connection_emits_only_present_fields() {
        let connection = DbConnection {
            driver: "postgres".into(),
            username: Some("reporter".into()),
            password: Some(String::new()),
            host: Some("db.internal".into()),
            database: Some("sales".into()),
            port: Some(5432),
            jdbc_dir: Some("/opt/jdbc".into()),
            ..Default::default()
        };
        let request = CommandRequest::new("in.jasper")
            .formats(["pdf"])
            .db_connection(connection);
        let line = builder().build(Operation::Process, &request).unwrap();
        assert_eq!(
            words(&line)[7..],
            [
                "-t",
                "postgres",
                "-u",
                "reporter",
                "-H",
                "db.internal",
                "-n",
                "sales",
                "--db-port",
                "5432",
                "--jdbc-dir",
                "/opt/jdbc",
            ]
        );
    }

    #[test]
    fn test_db_connection_requires_driver() {
        let request = CommandRequest::new("in.jasper")
            .formats(["pdf"])
            .db_connection(DbConnection::default());
        let err = builder().build(Operation::Process, &request).unwrap_err();
        assert!(matches!(kind(&err), JasperError::InvalidParameter(_)));
    }
}
