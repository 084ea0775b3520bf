/*
 * file.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Reading and atomically replacing files on disk.

use crate::{Error, FieldSet, PathSegment, Result, SpliceConfig, UpdateReport, Updated, update_text};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a whole file as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the contents of `path` with `text`.
///
/// The text goes to a temporary file next to the target, which then takes
/// the target's place with a rename. Readers never see a partially
/// written file, and a failure leaves the original untouched. An existing
/// file's permissions carry over to the new one.
pub fn write_atomically(path: &Path, text: &str) -> Result<()> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(text.as_bytes()).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;

    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?;
    }

    temp.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}

/// Write the update result to `path` unless nothing changed.
pub(crate) fn commit(path: &Path, updated: Updated) -> Result<UpdateReport> {
    if updated.report.changed {
        write_atomically(path, &updated.text)?;
        tracing::info!(path = %path.display(), created = ?updated.report.created, "updated file");
    } else {
        tracing::info!(path = %path.display(), "already up to date");
    }
    Ok(updated.report)
}

/// Apply [`update_text`] to a file in place.
pub fn update_file(
    path: &Path,
    segments: &[PathSegment],
    fields: &FieldSet,
    config: &SpliceConfig,
) -> Result<UpdateReport> {
    let text = read_source(path)?;
    let updated = update_text(&text, segments, fields, config).map_err(|e| e.with_path(path))?;
    commit(path, updated)
}
