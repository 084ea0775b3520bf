/*
 * lib.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Source positions for xmlsplice
//!
//! This crate maps byte offsets in a raw source text to human-facing
//! positions (1-based line and column) and gives line-level access to the
//! text. The XML parser uses it to stamp each parsed element with the
//! position of its opening tag, and the splicer uses it to read the
//! indentation of the line an element starts on.
//!
//! # Overview
//!
//! - [`SourceText`]: Owns the raw text together with its line index
//! - [`FileInformation`]: The line index itself (newline offsets only)
//! - [`Location`] / [`Position`]: 0-indexed byte-based and 1-indexed
//!   character-based views of a point in the text
//!
//! # Example
//!
//! ```rust
//! use xmlsplice_source_map::{Position, SourceText};
//!
//! let source = SourceText::new("<a>\n  <b/>\n</a>");
//! assert_eq!(source.position(6), Some(Position { line: 2, column: 3 }));
//! assert_eq!(source.line(1), Some("  <b/>"));
//! ```

pub mod file_info;
pub mod source_text;
pub mod types;
pub mod utils;

// Re-export main types
pub use file_info::FileInformation;
pub use source_text::SourceText;
pub use types::{Location, Position};
pub use utils::{detect_line_ending, leading_whitespace};
