/*
 * indent.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Indentation conventions read off the source text.

use std::collections::HashMap;
use xmlsplice_source_map::{Position, SourceText, leading_whitespace};
use xmlsplice_xml::{IndentUnit, XmlDocument, XmlElement};

/// Indentation of the element whose opening tag is at `position`.
///
/// This is the whitespace that starts the tag's line, cut off at the tag's
/// column. When the tag is not the first thing on its line, the line's own
/// leading whitespace is used.
pub fn base_indent(source: &SourceText, position: Position) -> String {
    let Some(line) = position
        .line
        .checked_sub(1)
        .and_then(|row| source.line(row))
    else {
        return String::new();
    };
    leading_whitespace(line)
        .chars()
        .take(position.column.saturating_sub(1))
        .collect()
}

/// Leading whitespace of the element's line, if the element's tag is the
/// first thing on it.
fn own_line_indent(source: &SourceText, element: &XmlElement) -> Option<String> {
    let position = element.location()?;
    let line = source.line(position.line.checked_sub(1)?)?;
    let indent = leading_whitespace(line);
    (indent.chars().count() + 1 == position.column).then(|| indent.to_string())
}

/// Guess the file's indent unit from how parsed children sit relative to
/// their parents.
///
/// Every parent/child pair where both tags start their own line
/// contributes the extra indentation of the child, provided it is a run of
/// a single repeated space or tab. The most frequent run wins; ties go to
/// the narrower one. Returns None when no pair qualifies.
pub fn infer_indent_unit(doc: &XmlDocument) -> Option<IndentUnit> {
    let mut counts: HashMap<IndentUnit, usize> = HashMap::new();
    count_steps(doc.source(), doc.root(), &mut counts);
    let unit = counts
        .into_iter()
        .max_by(|(unit_a, count_a), (unit_b, count_b)| {
            count_a
                .cmp(count_b)
                .then_with(|| unit_b.width().cmp(&unit_a.width()))
                .then_with(|| unit_b.byte().cmp(&unit_a.byte()))
        })
        .map(|(unit, _)| unit);
    tracing::debug!(?unit, "inferred indent unit");
    unit
}

fn count_steps(source: &SourceText, parent: &XmlElement, counts: &mut HashMap<IndentUnit, usize>) {
    let parent_indent = own_line_indent(source, parent);
    for (_, child) in parent.child_elements() {
        if let Some(parent_indent) = &parent_indent {
            let step = own_line_indent(source, child)
                .and_then(|indent| indent.strip_prefix(parent_indent.as_str()).map(str::to_string))
                .and_then(|step| IndentUnit::parse(&step));
            if let Some(unit) = step {
                *counts.entry(unit).or_default() += 1;
            }
        }
        count_steps(source, child, counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlsplice_xml::parse;

    fn position(line: usize, column: usize) -> Position {
        Position { line, column }
    }

    #[test]
    fn test_base_indent_of_tag() {
        let source = SourceText::new("<a>\n    <b/>\n\t<c/>\n</a>");
        assert_eq!(base_indent(&source, position(1, 1)), "");
        assert_eq!(base_indent(&source, position(2, 5)), "    ");
        assert_eq!(base_indent(&source, position(3, 2)), "\t");
    }

    #[test]
    fn test_base_indent_when_tag_is_not_first_on_line() {
        let source = SourceText::new("<a>\n  <b/><c/>\n</a>");
        assert_eq!(base_indent(&source, position(2, 7)), "  ");
    }

    #[test]
    fn test_base_indent_out_of_range() {
        let source = SourceText::new("<a/>");
        assert_eq!(base_indent(&source, position(9, 1)), "");
        assert_eq!(base_indent(&source, position(0, 1)), "");
    }

    #[test]
    fn test_infer_two_spaces() {
        let doc = parse("<project>\n  <build>\n    <plugins/>\n  </build>\n</project>\n").unwrap();
        assert_eq!(infer_indent_unit(&doc), Some(IndentUnit::spaces(2)));
    }

    #[test]
    fn test_infer_tabs_and_majority() {
        let doc = parse("<a>\n\t<b>\n\t\t<c/>\n\t\t<d/>\n\t</b>\n   <odd/>\n</a>").unwrap();
        assert_eq!(infer_indent_unit(&doc), Some(IndentUnit::tabs(1)));
    }

    #[test]
    fn test_infer_ignores_inline_children() {
        let doc = parse("<a><b><c/></b></a>").unwrap();
        assert_eq!(infer_indent_unit(&doc), None);

        let doc = parse("<a>\n  <b>x</b><c/>\n</a>").unwrap();
        assert_eq!(infer_indent_unit(&doc), Some(IndentUnit::spaces(2)));
    }
}
