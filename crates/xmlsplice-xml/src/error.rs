/*
 * error.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Error types for XML parsing and rendering.

use thiserror::Error;

/// Result type alias for xmlsplice-xml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or rendering XML.
///
/// Offsets are byte offsets into the text handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// XML syntax error from quick-xml.
    #[error("XML syntax error: {message}")]
    XmlSyntax {
        message: String,
        offset: Option<usize>,
    },

    /// The input ended while elements were still open.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        expected: String,
        offset: Option<usize>,
    },

    /// An end tag does not close the innermost open element.
    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag {
        expected: String,
        found: String,
        offset: Option<usize>,
    },

    /// Well-formed markup in a place where it is not allowed.
    #[error("invalid XML structure: {message}")]
    InvalidStructure {
        message: String,
        offset: Option<usize>,
    },

    /// Empty document (no root element).
    #[error("empty XML document: no root element found")]
    EmptyDocument,

    /// A second element at the top level.
    #[error("invalid XML: multiple root elements")]
    MultipleRoots { offset: Option<usize> },

    /// A subtree could not be serialized.
    #[error("failed to render XML: {message}")]
    Render { message: String },
}

impl Error {
    /// Byte offset the error points at, when known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::XmlSyntax { offset, .. }
            | Error::UnexpectedEof { offset, .. }
            | Error::MismatchedEndTag { offset, .. }
            | Error::InvalidStructure { offset, .. }
            | Error::MultipleRoots { offset } => *offset,
            Error::EmptyDocument | Error::Render { .. } => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Error::XmlSyntax { .. } => "syntax error here",
            Error::UnexpectedEof { .. } => "this element is never closed",
            Error::MismatchedEndTag { .. } => "this end tag does not match",
            Error::InvalidStructure { .. } => "not allowed here",
            Error::MultipleRoots { .. } => "second root element starts here",
            Error::EmptyDocument | Error::Render { .. } => "here",
        }
    }

    /// Render the error as a report with a source snippet.
    ///
    /// `name` is shown as the file name in the report and `source` must be
    /// the text that was parsed. Errors without an offset are reported
    /// without a snippet.
    pub fn to_report(&self, name: &str, source: &str) -> String {
        use ariadne::{Color, Config, Label, Report, ReportKind, Source};

        // ariadne counts spans in characters
        let char_offset = |byte: usize| {
            source
                .get(..byte.min(source.len()))
                .map_or(0, |prefix| prefix.chars().count())
        };

        let start = self.offset().map_or(0, char_offset);
        let mut report = Report::build(ReportKind::Error, name.to_string(), start)
            .with_config(Config::default().with_color(false))
            .with_message(self.to_string());

        if self.offset().is_some() {
            let end = (start + 1).min(source.chars().count()).max(start);
            report = report.with_label(
                Label::new((name.to_string(), start..end))
                    .with_message(self.label())
                    .with_color(Color::Red),
            );
        }

        let mut output = Vec::new();
        let written = report
            .finish()
            .write((name.to_string(), Source::from(source)), &mut output);
        match written.ok().and_then(|_| String::from_utf8(output).ok()) {
            Some(rendered) => rendered,
            None => self.to_string(),
        }
    }
}
