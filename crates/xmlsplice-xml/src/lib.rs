/*
 * lib.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Location-tracked XML trees for xmlsplice.
//!
//! This crate parses XML with [`quick-xml`] into a tree of [`XmlElement`]s in
//! which every parsed element knows where its opening tag sits in the
//! original text, and it writes such trees back out without disturbing the
//! bytes of anything that was not changed.
//!
//! # Overview
//!
//! The main types are:
//! - [`XmlDocument`]: The parsed document, including the raw source text
//! - [`XmlElement`]: An element with name, attributes, children and an
//!   optional source [`Position`]
//! - [`XmlNode`]: Element content (elements, text, comments, raw markup)
//!
//! and the three operations over them:
//! - [`parse`]: text to document, recording positions
//! - [`write_document`]: document to text, copying untouched regions
//! - [`render_subtree`]: a single element to pretty-printed text
//!
//! # Example
//!
//! ```rust
//! use xmlsplice_xml::{XmlElement, parse, write_document};
//!
//! let content = "<project>\n  <!-- hand-written -->\n  <build/>\n</project>\n";
//! let mut doc = parse(content).unwrap();
//!
//! let build = doc.root().position_of_child("build").unwrap();
//! doc.root_mut()
//!     .child_element_mut(build)
//!     .unwrap()
//!     .append_child(XmlElement::new("plugins"));
//!
//! assert_eq!(
//!     write_document(&doc),
//!     "<project>\n  <!-- hand-written -->\n  <build><plugins/></build>\n</project>\n"
//! );
//! ```

pub mod error;
pub mod parser;
pub mod render;
pub mod types;
pub mod writer;

// Re-export main types
pub use error::{Error, Result};
pub use parser::parse;
pub use render::{IndentUnit, render_subtree, render_subtree_at, render_subtree_lines};
pub use types::{TagSpans, XmlAttribute, XmlComment, XmlDocument, XmlElement, XmlNode, XmlText};
pub use writer::write_document;
pub use xmlsplice_source_map::{Position, SourceText};
