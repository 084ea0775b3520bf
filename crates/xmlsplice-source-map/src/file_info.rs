/*
 * file_info.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Efficient file information for location lookups

use crate::types::Location;
use std::ops::Range;

/// Line index for a piece of source text
///
/// This struct stores metadata about a file that enables fast conversion
/// from byte offsets to (row, column) positions without storing the full
/// file content.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInformation {
    /// Byte offsets of each newline character in the file
    line_breaks: Vec<usize>,

    /// Total length of the file in bytes
    total_length: usize,
}

impl FileInformation {
    /// Create file information by analyzing content
    ///
    /// Scans the content once to build an index of line break positions.
    /// This enables O(log n) offset-to-location lookups via binary search.
    pub fn new(content: &str) -> Self {
        let line_breaks: Vec<usize> = content
            .bytes()
            .enumerate()
            .filter_map(|(idx, b)| if b == b'\n' { Some(idx) } else { None })
            .collect();

        FileInformation {
            line_breaks,
            total_length: content.len(),
        }
    }

    /// Convert a byte offset to a Location with row and byte column
    ///
    /// Returns None if the offset is out of bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use xmlsplice_source_map::FileInformation;
    ///
    /// let info = FileInformation::new("hello\nworld");
    /// let loc = info.offset_to_location(6).unwrap();
    /// assert_eq!(loc.row, 1);
    /// assert_eq!(loc.column, 0);
    /// ```
    pub fn offset_to_location(&self, offset: usize) -> Option<Location> {
        if offset > self.total_length {
            return None;
        }

        // A newline belongs to the line it terminates, so an exact hit on a
        // line break still reports that line.
        let row = match self.line_breaks.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx,
        };

        let line_start = self.line_start(row)?;

        Some(Location {
            offset,
            row,
            column: offset - line_start,
        })
    }

    /// Byte offset at which `row` (0-indexed) begins.
    pub fn line_start(&self, row: usize) -> Option<usize> {
        if row == 0 {
            Some(0)
        } else {
            self.line_breaks.get(row - 1).map(|brk| brk + 1)
        }
    }

    /// Byte range of `row`, excluding its terminating newline.
    ///
    /// A carriage return before the newline is excluded as well, so CRLF
    /// files yield the same line text as LF files.
    pub fn line_range(&self, row: usize, content: &str) -> Option<Range<usize>> {
        let start = self.line_start(row)?;
        let mut end = self.line_breaks.get(row).copied().unwrap_or(self.total_length);
        if end > start && content.as_bytes().get(end - 1) == Some(&b'\r') {
            end -= 1;
        }
        Some(start..end)
    }

    /// Get the total length of the file in bytes
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Get the number of lines in the file
    pub fn line_count(&self) -> usize {
        self.line_breaks.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        let info = FileInformation::new("");
        assert_eq!(info.total_length(), 0);
        assert_eq!(info.line_count(), 1);

        let loc = info.offset_to_location(0).unwrap();
        assert_eq!(loc.offset, 0);
        assert_eq!(loc.row, 0);
        assert_eq!(loc.column, 0);
    }

    #[test]
    fn test_multiple_lines() {
        let content = "line 1\nline 2\nline 3";
        let info = FileInformation::new(content);
        assert_eq!(info.line_count(), 3);

        // At first newline (offset 6 is '\n')
        let loc = info.offset_to_location(6).unwrap();
        assert_eq!(loc.row, 0);
        assert_eq!(loc.column, 6);

        // Start of second line
        let loc = info.offset_to_location(7).unwrap();
        assert_eq!(loc.row, 1);
        assert_eq!(loc.column, 0);

        // End of file
        let loc = info.offset_to_location(20).unwrap();
        assert_eq!(loc.row, 2);
        assert_eq!(loc.column, 6);
    }

    #[test]
    fn test_out_of_bounds() {
        let info = FileInformation::new("hello");
        assert!(info.offset_to_location(100).is_none());
        assert!(info.line_start(3).is_none());
    }

    #[test]
    fn test_line_range_strips_terminators() {
        let content = "one\r\ntwo\nthree";
        let info = FileInformation::new(content);

        let first = info.line_range(0, content).unwrap();
        assert_eq!(&content[first], "one");
        let second = info.line_range(1, content).unwrap();
        assert_eq!(&content[second], "two");
        let third = info.line_range(2, content).unwrap();
        assert_eq!(&content[third], "three");
        assert!(info.line_range(3, content).is_none());
    }

    #[test]
    fn test_file_ending_with_newline() {
        let content = "line 1\nline 2\n";
        let info = FileInformation::new(content);
        assert_eq!(info.line_count(), 3);

        // After the final newline (empty line 3)
        let loc = info.offset_to_location(14).unwrap();
        assert_eq!(loc.row, 2);
        assert_eq!(loc.column, 0);
        assert_eq!(info.line_range(2, content), Some(14..14));
    }
}
