//! # Output Formats
//!
//! File: cli/src/common/jasper/format.rs
//!
//! The fixed set of output formats JasperStarter can render. Anything outside
//! this list is rejected before a command is ever built.
//!
use crate::core::error::JasperError;
use std::fmt;
use std::str::FromStr;

/// A report output format accepted by `jasperstarter process -f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Pdf,
    Rtf,
    Xls,
    Xlsx,
    Docx,
    Odt,
    Ods,
    Pptx,
    Csv,
    Html,
    Xhtml,
    Xml,
    Jrprint,
}

impl OutputFormat {
    /// Every supported format, in the order JasperStarter documents them.
    pub const ALL: [OutputFormat; 13] = [
        OutputFormat::Pdf,
        OutputFormat::Rtf,
        OutputFormat::Xls,
        OutputFormat::Xlsx,
        OutputFormat::Docx,
        OutputFormat::Odt,
        OutputFormat::Ods,
        OutputFormat::Pptx,
        OutputFormat::Csv,
        OutputFormat::Html,
        OutputFormat::Xhtml,
        OutputFormat::Xml,
        OutputFormat::Jrprint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Rtf => "rtf",
            OutputFormat::Xls => "xls",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Docx => "docx",
            OutputFormat::Odt => "odt",
            OutputFormat::Ods => "ods",
            OutputFormat::Pptx => "pptx",
            OutputFormat::Csv => "csv",
            OutputFormat::Html => "html",
            OutputFormat::Xhtml => "xhtml",
            OutputFormat::Xml => "xml",
            OutputFormat::Jrprint => "jrprint",
        }
    }

    /// Comma separated list of accepted names, used in error messages.
    pub fn whitelist() -> String {
        Self::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = JasperError;

    // Case-sensitive: jasperstarter itself only accepts lowercase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                JasperError::InvalidFormat(format!(
                    "'{}' is not one of: {}",
                    s,
                    Self::whitelist()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_whitelisted_name_parses() {
        for format in OutputFormat::ALL {
            assert_eq!(format.as_str().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_unknown_and_miscased_names_rejected() {
        for name in ["docm", "PDF", "", " pdf", "pdf;rm"] {
            let err = name.parse::<OutputFormat>().unwrap_err();
            assert!(matches!(err, JasperError::InvalidFormat(_)), "{name:?}");
        }
    }
}
