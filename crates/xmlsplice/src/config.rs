/*
 * config.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Splice settings.
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! indent_unit = "  "
//! infer_indent_unit = true
//! line_ending = "crlf"
//! ```
//!
//! Every key is optional.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use xmlsplice_source_map::detect_line_ending;
use xmlsplice_xml::IndentUnit;

/// Line terminator used for inserted lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Follow whatever the file mostly uses.
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn resolve(self, source: &str) -> &'static str {
        match self {
            LineEnding::Auto => detect_line_ending(source),
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpliceConfig {
    /// One level of indentation: a run of spaces or a run of tabs.
    pub indent_unit: String,

    /// Derive the indent unit from the file, falling back to
    /// `indent_unit` when the file shows no nesting.
    pub infer_indent_unit: bool,

    pub line_ending: LineEnding,
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            indent_unit: IndentUnit::default().to_string(),
            infer_indent_unit: false,
            line_ending: LineEnding::Auto,
        }
    }
}

impl SpliceConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Settings(e.to_string()))?;
        config.indent_unit()?;
        Ok(config)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|err| match err {
            Error::Settings(message) => {
                Error::Settings(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    pub fn with_indent_unit(mut self, unit: &str) -> Self {
        self.indent_unit = unit.to_string();
        self
    }

    pub fn with_inferred_indent_unit(mut self, infer: bool) -> Self {
        self.infer_indent_unit = infer;
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// The configured indent unit, validated.
    pub fn indent_unit(&self) -> Result<IndentUnit> {
        IndentUnit::parse(&self.indent_unit).ok_or_else(|| {
            Error::Settings(format!(
                "indent_unit must be a non-empty run of spaces or tabs, got {:?}",
                self.indent_unit
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpliceConfig::default();
        assert_eq!(config.indent_unit().unwrap(), IndentUnit::spaces(4));
        assert!(!config.infer_indent_unit);
        assert_eq!(config.line_ending, LineEnding::Auto);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = SpliceConfig::from_toml_str("indent_unit = \"\\t\"\n").unwrap();
        assert_eq!(config.indent_unit().unwrap(), IndentUnit::tabs(1));
        assert_eq!(config.line_ending, LineEnding::Auto);

        let config =
            SpliceConfig::from_toml_str("infer_indent_unit = true\nline_ending = \"crlf\"\n")
                .unwrap();
        assert!(config.infer_indent_unit);
        assert_eq!(config.line_ending, LineEnding::Crlf);
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        let err = SpliceConfig::from_toml_str("indent_unit = \"ab\"").unwrap_err();
        assert!(matches!(err, Error::Settings(_)), "{err}");

        let err = SpliceConfig::from_toml_str("indent = 2").unwrap_err();
        assert!(matches!(err, Error::Settings(_)), "{err}");

        let err = SpliceConfig::from_toml_str("line_ending = \"cr\"").unwrap_err();
        assert!(matches!(err, Error::Settings(_)), "{err}");
    }

    #[test]
    fn test_line_ending_resolution() {
        assert_eq!(LineEnding::Auto.resolve("<a>\r\n</a>\r\n"), "\r\n");
        assert_eq!(LineEnding::Auto.resolve("<a/>"), "\n");
        assert_eq!(LineEnding::Lf.resolve("<a>\r\n</a>"), "\n");
        assert_eq!(LineEnding::Crlf.resolve("<a/>"), "\r\n");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xmlsplice.toml");
        std::fs::write(&path, "indent_unit = \"  \"\n").unwrap();
        let config = SpliceConfig::load(&path).unwrap();
        assert_eq!(config.indent_unit().unwrap(), IndentUnit::spaces(2));

        let missing = SpliceConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, Error::Read { .. }));
    }
}
