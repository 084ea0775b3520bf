/*
 * writer.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Format-preserving document serialization.
//!
//! [`write_document`] turns a (possibly mutated) [`XmlDocument`] back into
//! text. Anything the tree has not changed is copied from the source text
//! byte for byte:
//!
//! - the prolog and epilog around the root element,
//! - every element for which [`XmlElement::is_pristine`] holds,
//! - the start and end tags of changed elements whose attributes were not
//!   touched,
//! - all text, comment and raw nodes, which are stored in source form.
//!
//! Only elements created in memory, and start tags whose attributes changed,
//! are generated. Generated markup is compact; layout for new subtrees is
//! the business of [`crate::render`].

use crate::{XmlDocument, XmlElement, XmlNode};

/// Serialize a document, reusing source bytes for everything unchanged.
///
/// # Example
///
/// ```rust
/// use xmlsplice_xml::{parse, write_document};
///
/// let content = "<a>\n  <!-- kept -->\n  <b   x='1'/>\n</a>\n";
/// let doc = parse(content).unwrap();
/// assert_eq!(write_document(&doc), content);
/// ```
pub fn write_document(doc: &XmlDocument) -> String {
    let source = doc.source().as_str();
    let mut out = String::with_capacity(source.len() + 256);
    out.push_str(doc.prolog());
    write_element(source, doc.root(), &mut out);
    out.push_str(doc.epilog());
    out
}

fn write_element(source: &str, element: &XmlElement, out: &mut String) {
    if let Some(spans) = element.spans() {
        if element.is_pristine() {
            out.push_str(&source[spans.full()]);
            return;
        }
    }

    let has_children = !element.children().is_empty();
    let reusable_spans = element.spans().filter(|_| !element.is_tag_modified());

    match reusable_spans {
        Some(spans) => {
            let start_tag = &source[spans.start_tag.clone()];
            if spans.is_self_closing() {
                if !has_children {
                    out.push_str(start_tag);
                    return;
                }
                out.push_str(open_self_closing_tag(start_tag));
                out.push('>');
            } else {
                out.push_str(start_tag);
            }
        }
        None => {
            write_start_tag(element, out);
            let self_closing = element.spans().is_none_or(|spans| spans.is_self_closing());
            if !has_children && self_closing {
                out.push_str("/>");
                return;
            }
            out.push('>');
        }
    }

    for child in element.children() {
        match child {
            XmlNode::Element(child) => write_element(source, child, out),
            XmlNode::Text(text) => out.push_str(text.raw()),
            XmlNode::Comment(comment) => out.push_str(comment.raw()),
            XmlNode::Raw(raw) => out.push_str(raw),
        }
    }

    match element.spans().and_then(|spans| spans.end_tag.clone()) {
        Some(end_tag) => out.push_str(&source[end_tag]),
        None => {
            out.push_str("</");
            out.push_str(element.name());
            out.push('>');
        }
    }
}

/// `<name attr="v"` without the closing bracket.
fn write_start_tag(element: &XmlElement, out: &mut String) {
    out.push('<');
    out.push_str(element.name());
    for attr in element.attributes() {
        out.push(' ');
        out.push_str(&attr.to_markup());
    }
}

/// Turn the source text of `<name .../>` into `<name ...` so that content
/// can follow it.
fn open_self_closing_tag(start_tag: &str) -> &str {
    let without_slash = start_tag
        .strip_suffix("/>")
        .unwrap_or(start_tag);
    without_slash.trim_end()
}
