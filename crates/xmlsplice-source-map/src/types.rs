/*
 * types.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Core position types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in source text (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Byte offset from start of source
    pub offset: usize,
    /// Row number (0-indexed)
    pub row: usize,
    /// Byte distance from the start of the row
    pub column: usize,
}

/// A human-facing position in source text.
///
/// Both fields are 1-based and the column counts characters, not bytes,
/// so `Position { line: 3, column: 5 }` is the fifth character on the
/// third line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_ordering() {
        let loc1 = Location {
            offset: 0,
            row: 0,
            column: 0,
        };
        let loc2 = Location {
            offset: 5,
            row: 0,
            column: 5,
        };
        let loc3 = Location {
            offset: 10,
            row: 1,
            column: 0,
        };

        assert!(loc1 < loc2);
        assert!(loc2 < loc3);
        assert!(loc1 < loc3);
    }

    #[test]
    fn test_position_ordering_is_line_major() {
        let a = Position { line: 1, column: 9 };
        let b = Position { line: 2, column: 1 };
        assert!(a < b);
    }

    #[test]
    fn test_position_display() {
        let pos = Position { line: 12, column: 4 };
        assert_eq!(pos.to_string(), "12:4");
    }

    #[test]
    fn test_serialization_position() {
        let pos = Position { line: 3, column: 5 };
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, r#"{"line":3,"column":5}"#);
        let deserialized: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, deserialized);
    }
}
