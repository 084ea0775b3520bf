/*
 * error.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Error types for xmlsplice

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input is not well-formed XML.
    ///
    /// Keeps the text that failed to parse so the error can be rendered
    /// with a source snippet.
    #[error("failed to parse {}: {source}", describe(.path))]
    Parse {
        path: Option<PathBuf>,
        text: String,
        #[source]
        source: xmlsplice_xml::Error,
    },

    /// No sentinel token could be generated that occurs exactly once in the
    /// serialized document.
    #[error("could not place a unique splice marker after {attempts} attempts")]
    SentinelCollision { attempts: usize },

    #[error("failed to render replacement subtree: {0}")]
    Render(#[source] xmlsplice_xml::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Settings(String),

    /// The requested path or node does not address an element that can be
    /// updated.
    #[error("invalid target: {0}")]
    InvalidTarget(String),
}

impl Error {
    /// Attach the file a parse error came from.
    pub fn with_path(self, file: &Path) -> Self {
        match self {
            Error::Parse { text, source, .. } => Error::Parse {
                path: Some(file.to_path_buf()),
                text,
                source,
            },
            other => other,
        }
    }

    /// Render parse errors as an annotated source report.
    ///
    /// Returns None for every other kind of error.
    pub fn report(&self) -> Option<String> {
        match self {
            Error::Parse { path, text, source } => Some(source.to_report(&describe(path), text)),
            _ => None,
        }
    }
}

fn describe(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map_or_else(|| "input".to_string(), |p| p.display().to_string())
}

pub type Result<T> = std::result::Result<T, Error>;
