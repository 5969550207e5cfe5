//! # Shared Command Arguments
//!
//! File: cli/src/commands/args.rs
//!
//! ## Overview
//!
//! Argument groups flattened into several subcommands, plus the helpers that
//! combine them with the loaded configuration:
//!
//! - `JasperArgs`: where JasperStarter and the reports live (`--executable`, `--resource-dir`)
//! - `ExecArgs`: how commands run (`--foreground`, `--no-redirect`, `--run-as`, `--print-command`)
//! - `RenderArgs`: output, formats and report parameters for `process`-style commands
//! - `DbArgs`: the datasource, from flags and/or a `[connections.<name>]` profile
//!
//! Flags and environment variables win over the TOML configuration.
//!
use crate::common::jasper::{BuiltCommand, DbConnection, ExecutionMode, JasperStarter, ParamValue, ReportParam};
use crate::core::config::Config;
use crate::core::error::{JasperError, Result};
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Location of the JasperStarter executable and the report resource directory.
#[derive(Args, Debug, Default)]
pub struct JasperArgs {
    /// Path to the jasperstarter executable. Defaults to `jasper.executable_path`, then PATH.
    #[arg(long, env = "JASPERRS_EXECUTABLE", value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Root directory holding one subdirectory per report. Defaults to `jasper.resource_dir`, then the current directory.
    #[arg(long, env = "JASPERRS_RESOURCE_DIR", value_name = "DIR")]
    pub resource_dir: Option<PathBuf>,
}

impl JasperArgs {
    /// Resolves the installation, preferring flags over configuration.
    pub fn connect(&self, cfg: &Config) -> Result<JasperStarter> {
        let executable = self
            .executable
            .clone()
            .or_else(|| cfg.jasper.executable_path.as_ref().map(PathBuf::from));
        let resource_dir = self
            .resource_dir
            .clone()
            .or_else(|| cfg.jasper.resource_dir.as_ref().map(PathBuf::from));
        JasperStarter::setup(executable.as_deref(), resource_dir.as_deref())
    }
}

/// Execution flags shared by every command that runs jasperstarter.
#[derive(Args, Debug, Default)]
pub struct ExecArgs {
    /// Do not background the jasperstarter process (no trailing `&`).
    #[arg(long)]
    pub foreground: bool,

    /// Leave stderr alone instead of appending `2>&1`.
    #[arg(long)]
    pub no_redirect: bool,

    /// Run jasperstarter as another user via `su -c`. Ignored on Windows.
    #[arg(long, value_name = "USER")]
    pub run_as: Option<String>,

    /// Print the escaped command instead of running it.
    #[arg(long)]
    pub print_command: bool,
}

impl ExecArgs {
    /// The configured execution mode with these flags applied on top.
    pub fn mode(&self, cfg: &Config) -> ExecutionMode {
        let mut mode = ExecutionMode::from(&cfg.execution);
        if self.foreground {
            mode.background = false;
        }
        if self.no_redirect {
            mode.redirect_output = false;
        }
        if let Some(user) = &self.run_as {
            mode.run_as_user = Some(user.clone());
        }
        mode
    }
}

/// Prints `command`, or runs it and prints whatever it wrote to stdout.
pub fn run_or_print(jasper: &JasperStarter, command: BuiltCommand, exec: &ExecArgs, cfg: &Config) -> Result<()> {
    if exec.print_command {
        println!("{}", command.preview());
        return Ok(());
    }
    let mode = jasper.resolve_mode(&exec.mode(cfg));
    for line in jasper.execute(command, &mode)? {
        println!("{}", line);
    }
    Ok(())
}

/// Output location, formats and report parameters.
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// Output file or directory (jasperstarter `-o`).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format; repeat or list several (pdf, rtf, xls, xlsx, docx, odt, ods, pptx, csv, html, xhtml, xml, jrprint).
    #[arg(short = 'f', long = "format", value_name = "FORMAT", num_args = 1.., default_value = "pdf")]
    pub formats: Vec<String>,

    /// Report parameter as NAME=VALUE. Plain numbers and true/false are passed bare, other text (including `007`) as a string; wrap in double quotes to force a string.
    #[arg(short = 'P', long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<ReportParam>,
}

impl RenderArgs {
    /// Parameters keyed by name; a later `-P` for the same name wins.
    pub fn parameters(&self) -> BTreeMap<String, ParamValue> {
        self.params
            .iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect()
    }
}

/// Datasource options. `--connection` loads a profile that the other flags refine.
#[derive(Args, Debug, Default)]
pub struct DbArgs {
    /// Named profile from `[connections.<name>]` in the configuration.
    #[arg(long, value_name = "NAME")]
    pub connection: Option<String>,

    /// Datasource type (jasperstarter `-t`), e.g. postgres, mysql, oracle, generic, csv, xml, json.
    #[arg(long = "db-type", value_name = "DRIVER")]
    pub driver: Option<String>,

    #[arg(long = "db-user", value_name = "USER")]
    pub username: Option<String>,

    #[arg(long = "db-password", env = "JASPERRS_DB_PASSWORD", hide_env_values = true, value_name = "PASSWORD")]
    pub password: Option<String>,

    #[arg(long = "db-host", value_name = "HOST")]
    pub host: Option<String>,

    #[arg(long = "db-name", value_name = "NAME")]
    pub database: Option<String>,

    #[arg(long = "db-port", value_name = "PORT")]
    pub port: Option<u16>,

    /// JDBC driver class name.
    #[arg(long = "jdbc-driver", value_name = "CLASS")]
    pub jdbc_driver: Option<String>,

    #[arg(long = "jdbc-url", value_name = "URL")]
    pub jdbc_url: Option<String>,

    /// Directory containing JDBC driver jars.
    #[arg(long = "jdbc-dir", value_name = "DIR")]
    pub jdbc_dir: Option<String>,

    /// Oracle SID.
    #[arg(long = "db-sid", value_name = "SID")]
    pub db_sid: Option<String>,

    #[arg(long = "json-query", value_name = "QUERY")]
    pub json_query: Option<String>,

    /// Data file for csv/xml/json datasources.
    #[arg(long = "data-file", value_name = "FILE")]
    pub data_file: Option<String>,
}

fn override_with(target: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

impl DbArgs {
    fn has_field_overrides(&self) -> bool {
        [
            &self.username,
            &self.password,
            &self.host,
            &self.database,
            &self.jdbc_driver,
            &self.jdbc_url,
            &self.jdbc_dir,
            &self.db_sid,
            &self.json_query,
            &self.data_file,
        ]
        .iter()
        .any(|v| v.is_some())
            || self.port.is_some()
    }

    /// Builds the datasource from the selected profile and flags, if any were given.
    pub fn resolve(&self, cfg: &Config) -> Result<Option<DbConnection>> {
        let profile = match &self.connection {
            Some(name) => Some(cfg.connections.get(name).cloned().ok_or_else(|| {
                JasperError::Config(format!("Unknown connection profile '{}'", name))
            })?),
            None => None,
        };

        let mut connection = match (profile, &self.driver) {
            (Some(profile), _) => profile,
            (None, Some(_)) => DbConnection::default(),
            (None, None) if self.has_field_overrides() => {
                return Err(JasperError::InvalidParameter(
                    "database options need --db-type or --connection".to_string(),
                )
                .into());
            }
            (None, None) => return Ok(None),
        };

        if let Some(driver) = &self.driver {
            connection.driver.clone_from(driver);
        }
        override_with(&mut connection.username, &self.username);
        override_with(&mut connection.password, &self.password);
        override_with(&mut connection.host, &self.host);
        override_with(&mut connection.database, &self.database);
        if self.port.is_some() {
            connection.port = self.port;
        }
        override_with(&mut connection.jdbc_driver, &self.jdbc_driver);
        override_with(&mut connection.jdbc_url, &self.jdbc_url);
        override_with(&mut connection.jdbc_dir, &self.jdbc_dir);
        override_with(&mut connection.db_sid, &self.db_sid);
        override_with(&mut connection.json_query, &self.json_query);
        override_with(&mut connection.data_file, &self.data_file);

        debug!("Using datasource of type '{}'", connection.driver);
        Ok(Some(connection))
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        exec: ExecArgs,
        #[command(flatten)]
        render: RenderArgs,
        #[command(flatten)]
        db: DbArgs,
    }

    fn parse(args: &[&str]) -> Harness {
        let mut argv = vec!["harness"];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv).expect("arguments should parse")
    }

    #[test]
    fn test_render_defaults_to_pdf() {
        let h = parse(&[]);
        assert_eq!(h.render.formats, ["pdf"]);
        assert!(h.render.parameters().is_empty());
    }

    #[test]
    fn test_render_formats_and_params() {
        let h = parse(&["-f", "pdf", "xlsx", "-f", "csv", "-P", "year=2024", "-P", "title=Q1 Sales", "-P", "year=2025"]);
        assert_eq!(h.render.formats, ["pdf", "xlsx", "csv"]);
        let params = h.render.parameters();
        assert_eq!(params["year"], ParamValue::Int(2025));
        assert_eq!(params["title"], ParamValue::Str("Q1 Sales".into()));
    }

    #[test]
    fn test_bad_param_rejected_by_parser() {
        assert!(Harness::try_parse_from(["harness", "-P", "novalue"]).is_err());
    }

    #[test]
    fn test_exec_flags_override_config() {
        let mut cfg = Config::default();
        cfg.execution.run_as_user = Some("reports".into());
        assert_eq!(
            parse(&[]).exec.mode(&cfg),
            ExecutionMode {
                redirect_output: true,
                background: true,
                run_as_user: Some("reports".into()),
            }
        );
        assert_eq!(
            parse(&["--foreground", "--no-redirect", "--run-as", "alice"]).exec.mode(&cfg),
            ExecutionMode {
                redirect_output: false,
                background: false,
                run_as_user: Some("alice".into()),
            }
        );
    }

    #[test]
    fn test_db_none_without_flags() {
        assert_eq!(parse(&[]).db.resolve(&Config::default()).unwrap(), None);
    }

    #[test]
    fn test_db_flags_without_type_rejected() {
        let err = parse(&["--db-host", "localhost"]).db.resolve(&Config::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JasperError>(),
            Some(JasperError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_db_profile_refined_by_flags() {
        let cfg: Config = toml::from_str(
            r#"
            [connections.warehouse]
            driver = "postgres"
            host = "db.internal"
            database = "sales"
            port = 5432
            "#,
        )
        .unwrap();
        let connection = parse(&["--connection", "warehouse", "--db-name", "archive", "--db-user", "ro"])
            .db
            .resolve(&cfg)
            .unwrap()
            .unwrap();
        assert_eq!(connection.driver, "postgres");
        assert_eq!(connection.host.as_deref(), Some("db.internal"));
        assert_eq!(connection.database.as_deref(), Some("archive"));
        assert_eq!(connection.username.as_deref(), Some("ro"));
        assert_eq!(connection.port, Some(5432));

        let err = parse(&["--connection", "missing"]).db.resolve(&cfg).unwrap_err();
        assert!(err.to_string().contains("Unknown connection profile"));
    }
}
