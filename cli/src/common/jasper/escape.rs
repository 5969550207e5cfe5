//! # Shell Escaping
//!
//! File: cli/src/common/jasper/escape.rs
//!
//! Serializes a `CommandLine` into the single string handed to the shell.
//! This is the only place quoting happens. Unix hosts get POSIX quoting via
//! `shlex`.
//!
//! Windows hosts need two layers. The program's argv parser (MSVCRT rules)
//! splits on whitespace and honours `"` with backslash escapes, so each
//! argument is quoted for that parser first. `cmd /C` then reads the whole
//! line, and carets only escape *outside* double quotes. Every cmd
//! metacharacter, the argv quotes included, is therefore caret-escaped, so
//! cmd never enters a quoted region and hands the program the argv-quoted
//! text verbatim.
//!
use super::builder::{Arg, CommandLine};
use super::mode::Platform;
use super::request::ParamValue;
use crate::core::error::{JasperError, Result};

/// Quotes every token and joins them with single spaces.
pub fn render(line: &CommandLine, platform: Platform) -> Result<String> {
    let mut parts = Vec::with_capacity(line.args.len());
    for arg in &line.args {
        let part = match arg {
            Arg::Word(word) => quote_word(word, platform)?,
            Arg::Param { name, value } => render_param(name, value, platform)?,
        };
        parts.push(part);
    }
    Ok(parts.join(" "))
}

/// Quotes one argument so the shell passes it through as a single word.
pub fn quote_word(word: &str, platform: Platform) -> Result<String> {
    match platform {
        Platform::Unix => shlex::try_quote(word)
            .map(|quoted| quoted.into_owned())
            .map_err(|_| JasperError::UnsafeArgument(format!("{:?} contains a NUL byte", word)).into()),
        Platform::Windows => quote_word_cmd(word),
    }
}

fn render_param(name: &str, value: &ParamValue, platform: Platform) -> Result<String> {
    match (value, platform) {
        (ParamValue::Str(s), Platform::Unix) => {
            if s.contains('\0') {
                return Err(JasperError::UnsafeArgument(format!(
                    "parameter '{}' contains a NUL byte",
                    name
                ))
                .into());
            }
            Ok(format!("{}=\"{}\"", name, escape_double_quoted(s)))
        }
        // jasperstarter receives `name=value` as one argv entry either way.
        (ParamValue::Str(s), Platform::Windows) => quote_word_cmd(&format!("{}={}", name, s)),
        (other, _) => Ok(format!("{}={}", name, other)),
    }
}

/// Escapes the characters that stay special inside POSIX double quotes.
pub fn escape_double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn reject_unquotable(arg: &str) -> Result<()> {
    if arg.chars().any(|ch| matches!(ch, '\n' | '\r' | '\0')) {
        return Err(JasperError::UnsafeArgument(
            "arguments containing NUL, carriage return or line feed cannot be safely quoted".into(),
        )
        .into());
    }
    Ok(())
}

/// Characters cmd.exe interprets outside double quotes.
fn is_cmd_meta(ch: char) -> bool {
    matches!(
        ch,
        '"' | '^' | '&' | '|' | '<' | '>' | '%' | '!' | '(' | ')'
    )
}

/// Quotes `arg` for the MSVCRT argv parser.
///
/// Backslashes are literal unless they precede a `"`, where they are doubled.
fn quote_argv(arg: &str) -> String {
    if !arg.is_empty() && !arg.chars().any(|ch| matches!(ch, ' ' | '\t' | '"')) {
        return arg.to_owned();
    }
    let mut buf = String::with_capacity(arg.len() + 2);
    buf.push('"');
    let mut backslashes = 0;
    for ch in arg.chars() {
        match ch {
            '\\' => backslashes += 1,
            '"' => {
                buf.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                buf.push('"');
                backslashes = 0;
            }
            _ => {
                buf.extend(std::iter::repeat('\\').take(backslashes));
                buf.push(ch);
                backslashes = 0;
            }
        }
    }
    // The closing quote must not be escaped by trailing backslashes.
    buf.extend(std::iter::repeat('\\').take(backslashes * 2));
    buf.push('"');
    buf
}

fn quote_word_cmd(arg: &str) -> Result<String> {
    reject_unquotable(arg)?;
    let argv = quote_argv(arg);
    let mut buf = String::with_capacity(argv.len() * 2);
    for ch in argv.chars() {
        if is_cmd_meta(ch) {
            buf.push('^');
        }
        buf.push(ch);
    }
    Ok(buf)
}
