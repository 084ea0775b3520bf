/*
 * parser.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! XML parser that builds location-tracked trees.

use crate::types::TagSpans;
use crate::{Error, Result, XmlAttribute, XmlComment, XmlDocument, XmlElement, XmlNode, XmlText};
use quick_xml::Reader;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::ops::Range;
use xmlsplice_source_map::{Position, SourceText};

/// Parse XML from a string, producing an [`XmlDocument`].
///
/// Every element in the resulting tree carries the 1-based line and column
/// of its opening tag's `<`.
///
/// # Example
///
/// ```rust
/// use xmlsplice_xml::parse;
///
/// let doc = parse("<project>\n  <build/>\n</project>").unwrap();
/// let build = doc.root().find_child("build").unwrap();
/// let location = build.location().unwrap();
/// assert_eq!((location.line, location.column), (2, 3));
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed. No partial tree is returned.
pub fn parse(content: &str) -> Result<XmlDocument> {
    let source = SourceText::new(content);
    let tree = XmlParser::new(&source).parse()?;
    Ok(XmlDocument::new(source, tree.prolog, tree.root, tree.epilog))
}

/// What the parser hands back before the document takes ownership of the
/// source text.
struct ParsedTree {
    prolog: Range<usize>,
    root: XmlElement,
    epilog: Range<usize>,
}

/// Internal parser state.
struct XmlParser<'a> {
    /// The source being parsed, used for positions and raw slices.
    source: &'a SourceText,

    /// The quick-xml reader, positioned after any byte-order mark.
    reader: Reader<&'a [u8]>,

    /// Where the reader's input starts in the source. Every reader position
    /// is shifted by this amount.
    base: usize,

    /// Stack of elements being built.
    stack: Vec<BuildNode>,

    /// The finished root element and its full span.
    root: Option<(XmlElement, Range<usize>)>,
}

/// A node being constructed during parsing.
struct BuildNode {
    name: String,
    attributes: Vec<XmlAttribute>,
    location: Option<Position>,
    start_tag: Range<usize>,
    children: Vec<XmlNode>,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a SourceText) -> Self {
        let base = source.bom_len();
        let mut reader = Reader::from_str(&source.as_str()[base..]);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        // End tags are matched against the stack below so that a mismatch
        // is reported with the offending element.
        reader.config_mut().check_end_names = false;

        Self {
            source,
            reader,
            base,
            stack: Vec::new(),
            root: None,
        }
    }

    fn parse(mut self) -> Result<ParsedTree> {
        loop {
            // Capture position before reading the event
            let event_start = self.position();

            let event = self.reader.read_event().map_err(|e| Error::XmlSyntax {
                message: e.to_string(),
                offset: Some(self.base + self.reader.error_position() as usize),
            })?;
            let span = event_start..self.position();

            match event {
                Event::Start(e) => self.handle_start(&e, span)?,
                Event::End(e) => {
                    let element = self.handle_end(&e, span)?;
                    self.attach(element)?;
                }
                Event::Empty(e) => {
                    let element = self.handle_empty(&e, span)?;
                    self.attach(element)?;
                }
                Event::Text(e) => self.handle_text(&e, span)?,
                Event::Comment(_) => {
                    let raw = self.raw(&span);
                    self.push_child(XmlNode::Comment(XmlComment::from_raw(raw)));
                }
                Event::CData(_) | Event::PI(_) => {
                    let raw = self.raw(&span).to_string();
                    self.push_child(XmlNode::Raw(raw));
                }
                Event::Decl(_) | Event::DocType(_) => {
                    if !self.stack.is_empty() || self.root.is_some() {
                        return Err(Error::InvalidStructure {
                            message: "declaration after the start of the root element".into(),
                            offset: Some(span.start),
                        });
                    }
                }
                Event::Eof => break,
            }
        }

        // Check for unclosed elements
        if let Some(node) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", node.name),
                offset: Some(node.start_tag.start),
            });
        }

        let (root, root_span) = self.root.ok_or(Error::EmptyDocument)?;

        Ok(ParsedTree {
            prolog: 0..root_span.start,
            root,
            epilog: root_span.end..self.source.as_str().len(),
        })
    }

    /// Reader position as an offset into the whole source.
    fn position(&self) -> usize {
        self.base + self.reader.buffer_position() as usize
    }

    fn raw(&self, span: &Range<usize>) -> &'a str {
        let source: &'a str = self.source.as_str();
        &source[span.clone()]
    }

    fn push_child(&mut self, node: XmlNode) {
        // Comments and instructions outside the root stay in the raw
        // prolog/epilog.
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    /// Hang a finished element on its parent, or make it the root.
    fn attach(&mut self, element: XmlElement) -> Result<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(XmlNode::Element(element));
            return Ok(());
        }

        let span = element.spans().map(TagSpans::full).unwrap_or_default();
        if self.root.is_some() {
            return Err(Error::MultipleRoots {
                offset: Some(span.start),
            });
        }
        self.root = Some((element, span));
        Ok(())
    }

    fn handle_start(&mut self, e: &BytesStart<'_>, span: Range<usize>) -> Result<()> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(Error::MultipleRoots {
                offset: Some(span.start),
            });
        }

        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let attributes = self.parse_attributes(e, span.start)?;

        self.stack.push(BuildNode {
            name,
            attributes,
            location: self.source.position(span.start),
            start_tag: span,
            children: Vec::new(),
        });

        Ok(())
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>, span: Range<usize>) -> Result<XmlElement> {
        let end_name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        let node = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("unexpected closing tag </{}>", end_name),
            offset: Some(span.start),
        })?;

        if node.name != end_name {
            return Err(Error::MismatchedEndTag {
                expected: node.name,
                found: end_name,
                offset: Some(span.start),
            });
        }

        Ok(XmlElement::parsed(
            node.name,
            node.attributes,
            node.children,
            node.location,
            TagSpans {
                start_tag: node.start_tag,
                end_tag: Some(span),
            },
        ))
    }

    fn handle_empty(&mut self, e: &BytesStart<'_>, span: Range<usize>) -> Result<XmlElement> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let attributes = self.parse_attributes(e, span.start)?;
        let location = self.source.position(span.start);

        Ok(XmlElement::parsed(
            name,
            attributes,
            Vec::new(),
            location,
            TagSpans {
                start_tag: span,
                end_tag: None,
            },
        ))
    }

    fn handle_text(&mut self, e: &BytesText<'_>, span: Range<usize>) -> Result<()> {
        // Validate entity and character references up front; the tree keeps
        // the escaped form.
        e.unescape().map_err(|err| Error::XmlSyntax {
            message: format!("invalid text content: {}", err),
            offset: Some(span.start),
        })?;

        let raw = self.raw(&span);
        if self.stack.is_empty() {
            if raw.trim().is_empty() {
                return Ok(());
            }
            return Err(Error::InvalidStructure {
                message: "text outside the root element".into(),
                offset: Some(span.start),
            });
        }

        self.push_child(XmlNode::Text(XmlText::from_raw(raw)));
        Ok(())
    }

    fn parse_attributes(&self, e: &BytesStart<'_>, tag_start: usize) -> Result<Vec<XmlAttribute>> {
        let mut attributes = Vec::new();

        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| Error::XmlSyntax {
                message: format!("attribute error: {}", err),
                offset: Some(tag_start),
            })?;

            let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
                message: format!("invalid attribute value: {}", err),
                offset: Some(tag_start),
            })?;

            attributes.push(XmlAttribute {
                name,
                value: value.into_owned(),
            });
        }

        Ok(attributes)
    }
}
