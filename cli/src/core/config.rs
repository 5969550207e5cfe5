//! # JasperRS Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements configuration loading for JasperRS: where the
//! JasperStarter executable lives, which directory holds the report
//! subdirectories, how commands are executed by default, and any named
//! database connection profiles.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags and environment variables (handled by clap in `commands::args`)
//! 2. Project-specific `.jasperrs.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! Paths are `~`-expanded and the merged configuration is validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [jasper]
//! executable_path = "~/opt/jasperstarter/bin/jasperstarter"
//! resource_dir = "~/reports"
//!
//! [execution]
//! background = false
//! run_as_user = "reports"
//!
//! [connections.warehouse]
//! driver = "postgres"
//! host = "db.internal"
//! database = "sales"
//! username = "reporter"
//! port = 5432
//! ```
//!
use crate::common::jasper::{DbConnection, ExecutionMode};
use crate::core::error::{JasperError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub jasper: JasperConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// Named database connection profiles, selectable with `--connection <name>`.
    #[serde(default)]
    pub connections: BTreeMap<String, DbConnection>,
}

/// Where JasperStarter and the reports live.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct JasperConfig {
    /// Path to the `jasperstarter` executable (can use ~). Falls back to a PATH lookup.
    pub executable_path: Option<String>,
    /// Root directory holding one subdirectory per report (can use ~).
    pub resource_dir: Option<String>,
}

/// Default execution flags applied to every command.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExecutionConfig {
    #[serde(default = "default_redirect_output")]
    pub redirect_output: bool,
    #[serde(default = "default_background")]
    pub background: bool,
    pub run_as_user: Option<String>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            redirect_output: default_redirect_output(),
            background: default_background(),
            run_as_user: None,
        }
    }
}

impl From<&ExecutionConfig> for ExecutionMode {
    fn from(cfg: &ExecutionConfig) -> Self {
        ExecutionMode {
            redirect_output: cfg.redirect_output,
            background: cfg.background,
            run_as_user: cfg.run_as_user.clone(),
        }
    }
}

fn default_redirect_output() -> bool {
    true
}
fn default_background() -> bool {
    true
}

const PROJECT_CONFIG_FILENAME: &str = ".jasperrs.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "JasperRS", "jasperrs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.jasperrs.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks up from `start` looking for `.jasperrs.toml`, stopping at a repository root.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.jasper.executable_path = project_cfg
        .jasper
        .executable_path
        .or(user.jasper.executable_path);
    merged.jasper.resource_dir = project_cfg.jasper.resource_dir.or(user.jasper.resource_dir);
    merged.execution.redirect_output =
        if project_cfg.execution.redirect_output != default_redirect_output() {
            project_cfg.execution.redirect_output
        } else {
            user.execution.redirect_output
        };
    merged.execution.background = if project_cfg.execution.background != default_background() {
        project_cfg.execution.background
    } else {
        user.execution.background
    };
    merged.execution.run_as_user = project_cfg
        .execution
        .run_as_user
        .or(user.execution.run_as_user);
    // Project profiles shadow user profiles of the same name.
    merged.connections = user.connections;
    merged.connections.extend(project_cfg.connections);
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    for path in [
        &mut config.jasper.executable_path,
        &mut config.jasper.resource_dir,
    ]
    .into_iter()
    .flatten()
    {
        *path = shellexpand::tilde(path.as_str()).into_owned();
        debug!("Expanded configured path: {}", path);
    }
    for connection in config.connections.values_mut() {
        for path in [&mut connection.jdbc_dir, &mut connection.data_file]
            .into_iter()
            .flatten()
        {
            *path = shellexpand::tilde(path.as_str()).into_owned();
        }
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if let Some(dir) = &config.jasper.resource_dir {
        let dir = PathBuf::from(dir);
        if dir.exists() && !dir.is_dir() {
            return Err(anyhow!(JasperError::Config(format!(
                "Configured resource path '{}' exists but is not a directory.",
                dir.display()
            ))));
        }
    }
    for (name, connection) in &config.connections {
        if connection.driver.trim().is_empty() {
            return Err(anyhow!(JasperError::Config(format!(
                "Connection profile '{}' must name a driver.",
                name
            ))));
        }
    }
    if let Some(user) = &config.execution.run_as_user {
        if user.chars().any(char::is_whitespace) {
            return Err(anyhow!(JasperError::Config(format!(
                "run_as_user '{}' must not contain whitespace.",
                user
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}
