/*
 * types.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Core types for location-tracked XML trees.

use quick_xml::escape::{escape, partial_escape, unescape};
use std::borrow::Cow;
use std::ops::Range;
use xmlsplice_source_map::{Position, SourceText};

/// A parsed XML document.
///
/// Besides the element tree, the document keeps the raw text it was parsed
/// from. Everything outside the root element (XML declaration, DOCTYPE,
/// leading comments, trailing whitespace) is kept only as raw text and is
/// written back verbatim.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    source: SourceText,
    prolog: Range<usize>,
    root: XmlElement,
    epilog: Range<usize>,
}

/// Byte spans of a parsed element's tags in the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpans {
    /// The start tag, from `<` to `>` (or `/>` for a self-closing element).
    pub start_tag: Range<usize>,

    /// The end tag, or None if the element was written as `<name/>`.
    pub end_tag: Option<Range<usize>>,
}

/// A node in an element's content.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(XmlText),
    Comment(XmlComment),

    /// Markup that is carried through without interpretation: CDATA
    /// sections and processing instructions, stored exactly as written.
    Raw(String),
}

/// Character data, stored in its escaped form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlText {
    raw: String,
}

/// A comment, stored as its complete markup including `<!--` and `-->`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlComment {
    raw: String,
}

/// An attribute with its unescaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// The attribute name as written, including any namespace prefix.
    pub name: String,

    /// The attribute value (after unescaping XML entities).
    pub value: String,
}

/// An XML element.
///
/// Elements produced by the parser carry the position of their opening tag
/// and the byte spans of their tags. Elements created in memory carry
/// neither. The position is fixed at parse time; there is no setter.
///
/// Every accessor that can change an element's content or start tag flags
/// the element as modified. The document writer reproduces an element from
/// its source bytes only while neither it nor any of its descendants is
/// flagged.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlNode>,
    location: Option<Position>,
    spans: Option<TagSpans>,
    modified: bool,
    tag_modified: bool,
}

impl XmlDocument {
    pub(crate) fn new(
        source: SourceText,
        prolog: Range<usize>,
        root: XmlElement,
        epilog: Range<usize>,
    ) -> Self {
        Self {
            source,
            prolog,
            root,
            epilog,
        }
    }

    /// The text the document was parsed from.
    pub fn source(&self) -> &SourceText {
        &self.source
    }

    /// Raw text preceding the root element.
    pub fn prolog(&self) -> &str {
        &self.source.as_str()[self.prolog.clone()]
    }

    /// Raw text following the root element.
    pub fn epilog(&self) -> &str {
        &self.source.as_str()[self.epilog.clone()]
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }
}

impl TagSpans {
    /// The whole element, from the start of its start tag to the end of its
    /// end tag.
    pub fn full(&self) -> Range<usize> {
        let end = self
            .end_tag
            .as_ref()
            .map_or(self.start_tag.end, |end_tag| end_tag.end);
        self.start_tag.start..end
    }

    pub fn is_self_closing(&self) -> bool {
        self.end_tag.is_none()
    }
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// True for text nodes that contain nothing but whitespace.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, XmlNode::Text(text) if text.is_whitespace())
    }
}

impl From<XmlElement> for XmlNode {
    fn from(element: XmlElement) -> Self {
        XmlNode::Element(element)
    }
}

impl From<XmlText> for XmlNode {
    fn from(text: XmlText) -> Self {
        XmlNode::Text(text)
    }
}

impl From<XmlComment> for XmlNode {
    fn from(comment: XmlComment) -> Self {
        XmlNode::Comment(comment)
    }
}

impl XmlText {
    /// Create a text node holding `value`, escaping `<`, `>` and `&`.
    pub fn new(value: &str) -> Self {
        Self {
            raw: partial_escape(value).into_owned(),
        }
    }

    /// Wrap text that is already in escaped form.
    pub(crate) fn from_raw(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
        }
    }

    /// The text exactly as it appears in markup.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The text with entity and character references resolved.
    pub fn value(&self) -> Cow<'_, str> {
        // Parsed text was validated by the parser and new text is escaped on
        // construction, so the fallback is never taken for well-formed trees.
        unescape(&self.raw).unwrap_or(Cow::Borrowed(&self.raw))
    }

    pub fn is_whitespace(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

impl XmlComment {
    /// Create a comment with the given body.
    pub fn new(content: &str) -> Self {
        Self {
            raw: format!("<!--{content}-->"),
        }
    }

    pub(crate) fn from_raw(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The comment body without the `<!--` and `-->` delimiters.
    pub fn content(&self) -> &str {
        let inner = self.raw.strip_prefix("<!--").unwrap_or(&self.raw);
        inner.strip_suffix("-->").unwrap_or(inner)
    }
}

impl XmlAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Render as `name="value"` with the value escaped.
    pub fn to_markup(&self) -> String {
        format!("{}=\"{}\"", self.name, escape(&self.value))
    }
}

impl XmlElement {
    /// Create an empty element that has no source location.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            location: None,
            spans: None,
            modified: false,
            tag_modified: false,
        }
    }

    /// Create an element whose only child is a text node holding `value`.
    pub fn with_text(name: impl Into<String>, value: &str) -> Self {
        let mut element = Self::new(name);
        if !value.is_empty() {
            element.children.push(XmlNode::Text(XmlText::new(value)));
        }
        element
    }

    pub(crate) fn parsed(
        name: String,
        attributes: Vec<XmlAttribute>,
        children: Vec<XmlNode>,
        location: Option<Position>,
        spans: TagSpans,
    ) -> Self {
        Self {
            name,
            attributes,
            children,
            location,
            spans: Some(spans),
            modified: false,
            tag_modified: false,
        }
    }

    /// The tag name as written, including any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the opening tag's `<`, for elements that came from the
    /// parser.
    pub fn location(&self) -> Option<Position> {
        self.location
    }

    pub fn is_located(&self) -> bool {
        self.location.is_some()
    }

    /// Byte spans of the element's tags in the source it was parsed from.
    pub fn spans(&self) -> Option<&TagSpans> {
        self.spans.as_ref()
    }

    /// True if the element's own content has been changed since parsing.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// True if the element's start tag (its attributes) has been changed
    /// since parsing.
    pub fn is_tag_modified(&self) -> bool {
        self.tag_modified
    }

    /// True if this is a parsed element and nothing in its subtree has been
    /// changed, so its source bytes still describe it exactly.
    pub fn is_pristine(&self) -> bool {
        self.spans.is_some()
            && !self.modified
            && !self.tag_modified
            && self.children.iter().all(|child| match child {
                XmlNode::Element(element) => element.is_pristine(),
                _ => true,
            })
    }

    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// Get an attribute value by name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing an existing value in place or appending
    /// a new attribute after the existing ones.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) if attr.value == value => return,
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(XmlAttribute::new(name, value)),
        }
        self.tag_modified = true;
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Mutable access to the child list. Flags the element as modified.
    pub fn children_mut(&mut self) -> &mut Vec<XmlNode> {
        self.modified = true;
        &mut self.children
    }

    /// Append a node as the last child and return its index.
    pub fn append_child(&mut self, node: impl Into<XmlNode>) -> usize {
        let children = self.children_mut();
        children.push(node.into());
        children.len() - 1
    }

    /// Mutable access to the child element at `index`.
    ///
    /// Unlike [`children_mut`](Self::children_mut) this does not flag this
    /// element: changes made through the returned reference flag the child.
    pub fn child_element_mut(&mut self, index: usize) -> Option<&mut XmlElement> {
        self.children.get_mut(index)?.as_element_mut()
    }

    /// Child elements in document order, paired with their index in
    /// [`children`](Self::children).
    pub fn child_elements(&self) -> impl Iterator<Item = (usize, &XmlElement)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| node.as_element().map(|element| (idx, element)))
    }

    /// The first child element named `name`.
    pub fn find_child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements()
            .map(|(_, element)| element)
            .find(|element| element.name == name)
    }

    /// Index of the first child element named `name`.
    pub fn position_of_child(&self, name: &str) -> Option<usize> {
        self.child_elements()
            .find(|(_, element)| element.name == name)
            .map(|(idx, _)| idx)
    }

    /// Text of the first child element named `name`, if there is one.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.find_child(name).map(XmlElement::text)
    }

    /// The element's direct text content, unescaped and trimmed.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            if let XmlNode::Text(t) = child {
                text.push_str(&t.value());
            }
        }
        text.trim().to_string()
    }

    /// Replace the element's content with a single text node.
    ///
    /// Returns false, and leaves the element untouched, when the content is
    /// already exactly `value`.
    pub fn set_text(&mut self, value: &str) -> bool {
        let unchanged = match self.children.as_slice() {
            [] => value.is_empty(),
            [XmlNode::Text(t)] => t.value() == value,
            _ => false,
        };
        if unchanged {
            return false;
        }

        let children = self.children_mut();
        children.clear();
        if !value.is_empty() {
            children.push(XmlNode::Text(XmlText::new(value)));
        }
        true
    }
}
