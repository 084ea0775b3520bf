/*
 * splice.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Splicing a re-rendered subtree back into the original text.
//!
//! The document writer reproduces every untouched element from its source
//! bytes, but it has no opinion on layout for content that was created in
//! memory. The splicer therefore takes the changed subtree out of the tree,
//! leaves a unique marker in its place, writes the document, and replaces
//! the marker with the subtree pretty-printed at the indentation of the
//! surrounding file.

use crate::indent::{base_indent, infer_indent_unit};
use crate::{Error, NodePath, Result, SpliceConfig};
use xmlsplice_source_map::Position;
use xmlsplice_xml::{XmlDocument, XmlNode, XmlText, render_subtree_lines, write_document};

/// How many marker tokens are tried before giving up.
pub const MAX_SENTINEL_ATTEMPTS: usize = 8;

/// The result of a splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOutcome {
    /// The complete new text of the document.
    pub text: String,

    /// False when the text is identical to the source.
    pub changed: bool,

    /// Name of the element that was re-rendered, if any.
    pub spliced: Option<String>,

    /// Position of the parsed element the rendered subtree was placed in.
    pub anchor: Option<Position>,
}

/// Produce the new document text for a change made at `target`.
///
/// Starting from `target`, the splicer ascends until it reaches an element
/// whose parent came from the source: that parent is the anchor and the
/// element below it is re-rendered. If that element was parsed and nothing
/// in its subtree changed, the document is written without splicing, which
/// yields the source text when nothing else changed either.
pub fn splice(doc: XmlDocument, target: &NodePath, config: &SpliceConfig) -> Result<SpliceOutcome> {
    splice_with_tokens(doc, target, config, &mut new_sentinel)
}

fn new_sentinel() -> String {
    format!("@XMLSPLICE_{}@", uuid::Uuid::new_v4().simple())
}

fn splice_with_tokens(
    mut doc: XmlDocument,
    target: &NodePath,
    config: &SpliceConfig,
    next_token: &mut dyn FnMut() -> String,
) -> Result<SpliceOutcome> {
    let unit = config.indent_unit()?;
    let splice_path = splice_point(&doc, target)?;
    let anchor_path = splice_path
        .parent()
        .ok_or_else(|| Error::InvalidTarget("the root element cannot be spliced".to_string()))?;
    let index = splice_path
        .last_index()
        .ok_or_else(|| Error::InvalidTarget("the root element cannot be spliced".to_string()))?;

    let (spliced_name, pristine) = match splice_path.resolve(doc.root()) {
        Some(element) => (element.name().to_string(), element.is_pristine()),
        None => return Err(Error::InvalidTarget(format!("no element at {splice_path}"))),
    };
    let anchor_position = anchor_path
        .resolve(doc.root())
        .and_then(|anchor| anchor.location())
        .ok_or_else(|| Error::InvalidTarget(format!("no parsed element at {anchor_path}")))?;

    if pristine {
        let text = write_document(&doc);
        let changed = text != doc.source().as_str();
        tracing::debug!(element = %spliced_name, changed, "target unchanged, nothing to splice");
        return Ok(SpliceOutcome {
            text,
            changed,
            spliced: None,
            anchor: None,
        });
    }

    let source = doc.source().as_str().to_string();
    let base = base_indent(doc.source(), anchor_position);
    let unit = if config.infer_indent_unit {
        infer_indent_unit(&doc).unwrap_or(unit)
    } else {
        unit
    };
    let eol = config.line_ending.resolve(&source);
    tracing::debug!(
        element = %spliced_name,
        anchor = %anchor_position,
        base_indent = base.len(),
        %unit,
        "splicing subtree"
    );

    // Swap the subtree for a placeholder, dropping the whitespace that
    // indented it in the source.
    let children = anchor_children(&mut doc, &anchor_path)?;
    if index >= children.len() {
        return Err(Error::InvalidTarget(format!("no element at {splice_path}")));
    }
    let detached = std::mem::replace(&mut children[index], XmlNode::Text(XmlText::new("")));
    let XmlNode::Element(subtree) = detached else {
        return Err(Error::InvalidTarget(format!("no element at {splice_path}")));
    };
    let mut index = index;
    if index > 0 && children[index - 1].is_whitespace() {
        children.remove(index - 1);
        index -= 1;
    }
    let is_last = index + 1 == children.len();

    // Line breaks inside text values are content and are left alone.
    let lines = render_subtree_lines(&subtree, unit).map_err(Error::Render)?;
    let mut replacement = String::new();
    for line in &lines {
        replacement.push_str(eol);
        if !line.is_empty() {
            replacement.push_str(&base);
            replacement.push_str(&unit.to_string());
            replacement.push_str(line);
        }
    }
    if is_last {
        replacement.push_str(eol);
        replacement.push_str(&base);
    }

    for attempt in 1..=MAX_SENTINEL_ATTEMPTS {
        let sentinel = next_token();
        if source.contains(&sentinel) {
            tracing::debug!(attempt, "splice marker occurs in source, regenerating");
            continue;
        }
        anchor_children(&mut doc, &anchor_path)?[index] = XmlNode::Text(XmlText::new(&sentinel));

        let written = write_document(&doc);
        if written.matches(sentinel.as_str()).count() != 1 {
            tracing::debug!(attempt, "splice marker is not unique, regenerating");
            continue;
        }

        let text = written.replacen(sentinel.as_str(), &replacement, 1);
        let changed = text != source;
        return Ok(SpliceOutcome {
            text,
            changed,
            spliced: Some(spliced_name),
            anchor: Some(anchor_position),
        });
    }

    Err(Error::SentinelCollision {
        attempts: MAX_SENTINEL_ATTEMPTS,
    })
}

/// Ascend from `target` to the highest element that still sits in a parsed
/// parent.
fn splice_point(doc: &XmlDocument, target: &NodePath) -> Result<NodePath> {
    if target.resolve(doc.root()).is_none() {
        return Err(Error::InvalidTarget(format!("no element at {target}")));
    }
    let mut current = target.clone();
    loop {
        let Some(parent) = current.parent() else {
            return Err(Error::InvalidTarget(
                "the root element cannot be spliced".to_string(),
            ));
        };
        let located = parent
            .resolve(doc.root())
            .is_some_and(|element| element.is_located());
        if located {
            return Ok(current);
        }
        current = parent;
    }
}

fn anchor_children<'a>(doc: &'a mut XmlDocument, anchor: &NodePath) -> Result<&'a mut Vec<XmlNode>> {
    anchor
        .resolve_mut(doc.root_mut())
        .map(|element| element.children_mut())
        .ok_or_else(|| Error::InvalidTarget(format!("no element at {anchor}")))
}
