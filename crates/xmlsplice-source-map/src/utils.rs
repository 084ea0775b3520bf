/*
 * utils.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Utility functions for working with lines of source text

/// The run of spaces and tabs at the start of `line`.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// The line terminator a text predominantly uses.
///
/// Returns `"\r\n"` when more lines end in CRLF than in a bare LF, and
/// `"\n"` otherwise (including for text without any line break).
pub fn detect_line_ending(text: &str) -> &'static str {
    let total = text.matches('\n').count();
    let crlf = text.matches("\r\n").count();
    if crlf > total - crlf { "\r\n" } else { "\n" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_whitespace() {
        assert_eq!(leading_whitespace("    <a/>"), "    ");
        assert_eq!(leading_whitespace("\t\t<a/>"), "\t\t");
        assert_eq!(leading_whitespace(" \t x"), " \t ");
        assert_eq!(leading_whitespace("<a/>"), "");
        assert_eq!(leading_whitespace("   "), "   ");
    }

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(detect_line_ending("a\r\nb\r\nc\n"), "\r\n");
        assert_eq!(detect_line_ending("a\nb\r\nc\n"), "\n");
        assert_eq!(detect_line_ending("no breaks"), "\n");
    }
}
