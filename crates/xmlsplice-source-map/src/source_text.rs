/*
 * source_text.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Raw source text with its line index

use crate::file_info::FileInformation;
use crate::types::{Location, Position};

const BOM: char = '\u{feff}';

/// The raw text of a document together with a [`FileInformation`] index.
///
/// The text is kept exactly as it was read; nothing in this crate
/// normalizes line endings or whitespace. A leading byte-order mark stays in
/// the text but is not part of the first line: it counts for byte offsets
/// only, never for columns.
#[derive(Debug, Clone)]
pub struct SourceText {
    content: String,
    info: FileInformation,
}

impl SourceText {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let info = FileInformation::new(&content);
        Self { content, info }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn info(&self) -> &FileInformation {
        &self.info
    }

    /// Length in bytes of the UTF-8 byte-order mark the text starts with, or
    /// zero when there is none.
    pub fn bom_len(&self) -> usize {
        if self.content.starts_with(BOM) {
            BOM.len_utf8()
        } else {
            0
        }
    }

    /// Byte-based location of `offset`.
    pub fn location(&self, offset: usize) -> Option<Location> {
        self.info.offset_to_location(offset)
    }

    /// 1-based line and character column of `offset`.
    ///
    /// Returns None when the offset is past the end of the text or does not
    /// fall on a character boundary.
    pub fn position(&self, offset: usize) -> Option<Position> {
        let location = self.info.offset_to_location(offset)?;
        let mut line_start = offset - location.column;
        if location.row == 0 {
            line_start = line_start.max(self.bom_len()).min(offset);
        }
        let column = self.content.get(line_start..offset)?.chars().count();
        Some(Position {
            line: location.row + 1,
            column: column + 1,
        })
    }

    /// Text of line `row` (0-indexed) without its line terminator.
    pub fn line(&self, row: usize) -> Option<&str> {
        let mut range = self.info.line_range(row, &self.content)?;
        if row == 0 {
            range.start = range.start.max(self.bom_len()).min(range.end);
        }
        self.content.get(range)
    }

    /// Number of lines, counting a trailing empty line after a final newline.
    pub fn line_count(&self) -> usize {
        self.info.line_count()
    }
}
