/*
 * render.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Pretty-printing of detached subtrees.
//!
//! The renderer is a pure function of the element it is given: it never
//! looks at source spans or at the document the element came from. Layout
//! rules:
//!
//! - each nesting level is indented by one [`IndentUnit`],
//! - whitespace-only text is dropped and other text is trimmed,
//! - an element without content renders as `<name/>`,
//! - an element whose content is text renders on a single line,
//! - line breaks inside text values are content and are never indented.

use crate::{Error, Result, XmlElement, XmlNode};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::fmt;

/// One level of indentation: a run of a single repeated space or tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndentUnit {
    byte: u8,
    width: usize,
}

impl IndentUnit {
    pub const fn spaces(width: usize) -> Self {
        Self { byte: b' ', width }
    }

    pub const fn tabs(width: usize) -> Self {
        Self { byte: b'\t', width }
    }

    /// Interpret a literal indentation string such as `"  "` or `"\t"`.
    ///
    /// Returns None for empty strings and for strings that mix characters
    /// or contain anything other than spaces and tabs.
    pub fn parse(literal: &str) -> Option<Self> {
        let first = *literal.as_bytes().first()?;
        if first != b' ' && first != b'\t' {
            return None;
        }
        if !literal.bytes().all(|b| b == first) {
            return None;
        }
        Some(Self {
            byte: first,
            width: literal.len(),
        })
    }

    pub fn byte(&self) -> u8 {
        self.byte
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The unit as a string, `depth` times over.
    pub fn repeat(&self, depth: usize) -> String {
        char::from(self.byte).to_string().repeat(self.width * depth)
    }
}

impl Default for IndentUnit {
    fn default() -> Self {
        Self::spaces(4)
    }
}

impl fmt::Display for IndentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repeat(1))
    }
}

/// Render `element` as indented XML whose first line starts at column zero.
///
/// # Example
///
/// ```rust
/// use xmlsplice_xml::{IndentUnit, XmlElement, render_subtree};
///
/// let mut plugin = XmlElement::new("plugin");
/// plugin.append_child(XmlElement::with_text("groupId", "g1"));
/// plugin.append_child(XmlElement::new("configuration"));
///
/// let text = render_subtree(&plugin, IndentUnit::spaces(2)).unwrap();
/// assert_eq!(
///     text,
///     "<plugin>\n  <groupId>g1</groupId>\n  <configuration/>\n</plugin>"
/// );
/// ```
pub fn render_subtree(element: &XmlElement, unit: IndentUnit) -> Result<String> {
    Ok(render_subtree_lines(element, unit)?.join("\n"))
}

/// Render `element` with every line prefixed by `base_indent`.
pub fn render_subtree_at(element: &XmlElement, unit: IndentUnit, base_indent: &str) -> Result<String> {
    let lines: Vec<String> = render_subtree_lines(element, unit)?
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{base_indent}{line}")
            }
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Render `element` as layout lines, the first starting at column zero.
///
/// Lines are only broken where the renderer lays out markup, so a caller
/// may prefix every line without touching content: a text or CDATA value
/// that spans several lines stays inside a single entry. The continuation
/// lines of a multi-line comment are re-indented to the comment's own level
/// and become entries of their own, which keeps repeated rendering of the
/// same comment stable.
pub fn render_subtree_lines(element: &XmlElement, unit: IndentUnit) -> Result<Vec<String>> {
    let mut renderer = LineRenderer {
        writer: Writer::new_with_indent(Vec::new(), unit.byte(), unit.width()),
        unit,
        depth: 0,
        breaks: Vec::new(),
    };
    renderer.element(element)?;

    let LineRenderer { writer, breaks, .. } = renderer;
    let bytes = writer.into_inner();
    let mut lines = Vec::with_capacity(breaks.len() + 1);
    let mut start = 0;
    for line_break in breaks {
        lines.push(utf8(&bytes[start..line_break])?);
        start = line_break + 1;
    }
    lines.push(utf8(&bytes[start..])?);
    Ok(lines)
}

/// Which newlines in an event's output are layout rather than content.
enum Breaks {
    /// Text never gets a line break from the writer.
    Never,
    /// Tags may be preceded by the writer's newline and indentation.
    Leading,
    /// Every newline in a rendered comment is layout.
    All,
}

struct LineRenderer {
    writer: Writer<Vec<u8>>,
    unit: IndentUnit,
    /// Number of open elements.
    depth: usize,
    /// Byte offsets of layout newlines in the writer's output.
    breaks: Vec<usize>,
}

impl LineRenderer {
    fn element(&mut self, element: &XmlElement) -> Result<()> {
        let mut start = BytesStart::new(element.name());
        for attr in element.attributes() {
            start.push_attribute((attr.name.as_str(), attr.value.as_str()));
        }

        let content: Vec<&XmlNode> = element
            .children()
            .iter()
            .filter(|node| !node.is_whitespace())
            .collect();

        if content.is_empty() {
            return self.write(Event::Empty(start), Breaks::Leading);
        }

        self.write(Event::Start(start), Breaks::Leading)?;
        self.depth += 1;
        for node in content {
            match node {
                XmlNode::Element(child) => self.element(child)?,
                XmlNode::Text(text) => self.write(
                    Event::Text(BytesText::from_escaped(text.raw().trim())),
                    Breaks::Never,
                )?,
                XmlNode::Comment(comment) => {
                    let content = reindent_comment(comment.content(), &self.unit.repeat(self.depth));
                    self.write(Event::Comment(BytesText::from_escaped(content)), Breaks::All)?;
                }
                // CDATA and instructions are emitted as written, inline
                XmlNode::Raw(raw) => self.write(
                    Event::Text(BytesText::from_escaped(raw.as_str())),
                    Breaks::Never,
                )?,
            }
        }
        self.depth -= 1;
        self.write(Event::End(BytesEnd::new(element.name())), Breaks::Leading)
    }

    fn write(&mut self, event: Event<'_>, breaks: Breaks) -> Result<()> {
        let start = self.writer.get_ref().len();
        self.writer.write_event(event).map_err(render_error)?;
        let written = &self.writer.get_ref()[start..];
        match breaks {
            Breaks::Never => {}
            Breaks::Leading => {
                if written.first() == Some(&b'\n') {
                    self.breaks.push(start);
                }
            }
            Breaks::All => {
                let newlines = written
                    .iter()
                    .enumerate()
                    .filter(|(_, byte)| **byte == b'\n')
                    .map(|(i, _)| start + i);
                self.breaks.extend(newlines);
            }
        }
        Ok(())
    }
}

/// Lay out the continuation lines of a comment at `indent`, keeping their
/// indentation relative to each other.
///
/// Whitespace-only lines are emptied, except for the last one, which holds
/// the closing `-->`.
fn reindent_comment(content: &str, indent: &str) -> String {
    let mut lines = content.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));
    let Some(first) = lines.next() else {
        return String::new();
    };
    let rest: Vec<&str> = lines.collect();
    if rest.is_empty() {
        return first.to_string();
    }

    let common = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_blanks(line))
        .reduce(common_prefix)
        .unwrap_or("");

    let mut out = first.to_string();
    let last = rest.len() - 1;
    for (i, line) in rest.iter().enumerate() {
        out.push('\n');
        if line.trim().is_empty() {
            if i == last {
                out.push_str(indent);
            }
            continue;
        }
        out.push_str(indent);
        out.push_str(&line[common.len()..]);
    }
    out
}

fn leading_blanks(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

fn utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(render_error)
}

fn render_error(err: impl fmt::Display) -> Error {
    Error::Render {
        message: err.to_string(),
    }
}
