//! # Execution Modes
//!
//! File: cli/src/common/jasper/mode.rs
//!
//! ## Overview
//!
//! Cross-cutting execution flags applied to an already escaped command:
//! stderr redirection, backgrounding, and running as another user through
//! `su`. The host platform is consulted once, in `ExecutionMode::resolve`; the
//! resulting `ResolvedMode` is what every later step sees.
//!
//! Order of application to the inner command:
//! 1. ` 2>&1`
//! 2. ` &`
//! 3. `su -c "<command>" <user>` wraps the suffixed command
//!
use super::escape::{escape_double_quoted, quote_word};
use crate::core::error::Result;
use tracing::debug;

/// The shell family commands are rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Requested execution flags, before the platform has had its say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMode {
    pub redirect_output: bool,
    pub background: bool,
    pub run_as_user: Option<String>,
}

impl Default for ExecutionMode {
    fn default() -> Self {
        Self {
            redirect_output: true,
            background: true,
            run_as_user: None,
        }
    }
}

/// Execution flags that actually apply on the target platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMode {
    pub redirect_output: bool,
    pub background: bool,
    pub run_as_user: Option<String>,
}

impl ExecutionMode {
    /// On Windows every flag is dropped: foreground, unredirected, current user.
    pub fn resolve(&self, platform: Platform) -> ResolvedMode {
        match platform {
            Platform::Windows => ResolvedMode::default(),
            Platform::Unix => ResolvedMode {
                redirect_output: self.redirect_output,
                background: self.background,
                run_as_user: self
                    .run_as_user
                    .clone()
                    .filter(|user| !user.is_empty()),
            },
        }
    }
}

impl ResolvedMode {
    /// Appends the suffixes and wrapping this mode calls for to `command`.
    pub fn apply(&self, command: &str) -> Result<String> {
        let mut inner = command.to_string();
        if self.redirect_output {
            inner.push_str(" 2>&1");
        }
        if self.background {
            inner.push_str(" &");
        }
        let wrapped = match &self.run_as_user {
            Some(user) => format!(
                "su -c \"{}\" {}",
                escape_double_quoted(&inner),
                quote_word(user, Platform::Unix)?
            ),
            None => inner,
        };
        debug!("Applied execution mode {:?}", self);
        Ok(wrapped)
    }
}

/// An escaped command ready for the shell, consumed once by the process runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltCommand {
    text: String,
    mode: Option<ResolvedMode>,
}

impl BuiltCommand {
    /// Wraps already escaped command text.
    pub fn new(text: String) -> Self {
        Self { text, mode: None }
    }

    /// The command exactly as it would be handed to the shell right now.
    pub fn preview(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> Option<&ResolvedMode> {
        self.mode.as_ref()
    }

    /// Applies `mode` to this command. Suffixes are only ever appended.
    pub fn with_mode(self, mode: ResolvedMode) -> Result<Self> {
        let text = mode.apply(&self.text)?;
        Ok(Self {
            text,
            mode: Some(mode),
        })
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
