//! # Command Requests
//!
//! File: cli/src/common/jasper/request.rs
//!
//! ## Overview
//!
//! Immutable descriptions of what should be asked of JasperStarter. A
//! `CommandRequest` is built per call, handed to the `CommandBuilder` and then
//! dropped; nothing here performs I/O.
//!
//! - `Operation`: which jasperstarter subcommand to run
//! - `CommandRequest`: input/output paths, formats, parameters, database options
//! - `ParamValue`: a typed report parameter value (`-P name=value`)
//! - `DbConnection`: the `-t` datasource clause and its optional flags
//!
use crate::core::error::JasperError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The jasperstarter subcommand a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Compile,
    Process,
    ListParameters,
}

impl Operation {
    /// Keyword passed to jasperstarter right after the executable.
    pub fn keyword(self) -> &'static str {
        match self {
            Operation::Compile => "compile",
            Operation::Process => "process",
            Operation::ListParameters => "list_parameters",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A report parameter value. Strings are emitted quoted, everything else bare.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    /// Infers the value type from its text: `true`/`false`, integers and
    /// floats in canonical form stay bare, `"..."` forces a string, anything else is a string.
    fn from(raw: &str) -> Self {
        if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            return ParamValue::Str(raw[1..raw.len() - 1].to_string());
        }
        match raw {
            "true" => return ParamValue::Bool(true),
            "false" => return ParamValue::Bool(false),
            _ => {}
        }
        // Numbers stay bare only if they print back exactly as given, so
        // `007`, `+5` or `2.50` keep their text.
        if let Some(i) = raw.parse::<i64>().ok().filter(|i| i.to_string() == raw) {
            return ParamValue::Int(i);
        }
        match raw.parse::<f64>() {
            Ok(x) if x.is_finite() && x.to_string() == raw => ParamValue::Float(x),
            _ => ParamValue::Str(raw.to_string()),
        }
    }
}

/// One `NAME=VALUE` pair as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportParam {
    pub name: String,
    pub value: ParamValue,
}

impl FromStr for ReportParam {
    type Err = JasperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s.split_once('=').ok_or_else(|| {
            JasperError::InvalidParameter(format!("'{}' is not in NAME=VALUE form", s))
        })?;
        validate_param_name(name)?;
        Ok(ReportParam {
            name: name.to_string(),
            value: ParamValue::from(value),
        })
    }
}

/// Parameter names are emitted unquoted, so they are limited to a safe alphabet.
pub fn validate_param_name(name: &str) -> Result<(), JasperError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if valid {
        Ok(())
    } else {
        Err(JasperError::InvalidParameter(format!(
            "'{}' is not a valid parameter name",
            name
        )))
    }
}

/// Datasource options for `jasperstarter process`.
///
/// `driver` is always emitted (as `-t`); every other field only when set and
/// non-empty. Field names match the keys accepted in `[connections.<name>]`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DbConnection {
    pub driver: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub database: Option<String>,
    pub port: Option<u16>,
    /// JDBC driver class name (`--db-driver`).
    pub jdbc_driver: Option<String>,
    pub jdbc_url: Option<String>,
    /// Directory holding JDBC driver jars (`--jdbc-dir`).
    pub jdbc_dir: Option<String>,
    pub db_sid: Option<String>,
    pub json_query: Option<String>,
    pub data_file: Option<String>,
}

/// Everything the builder needs to emit one jasperstarter invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Raw format names; validated against the whitelist when the command is built.
    pub formats: Vec<String>,
    pub parameters: BTreeMap<String, ParamValue>,
    pub db_connection: Option<DbConnection>,
    /// Overrides the builder's default `-r` directory.
    pub resource_dir: Option<PathBuf>,
}

impl CommandRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn db_connection(mut self, connection: DbConnection) -> Self {
        self.db_connection = Some(connection);
        self
    }

    pub fn resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }
}
