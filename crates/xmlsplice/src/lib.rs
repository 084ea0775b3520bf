/*
 * lib.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Update one part of a hand-maintained XML file, leave the rest alone.
//!
//! Re-serializing a whole XML tree loses the comments, attribute layout and
//! indentation people put into files such as `pom.xml`. This crate changes
//! only the subtree an update is about:
//!
//! 1. the text is parsed into a tree whose elements remember where they
//!    came from ([`xmlsplice_xml`]),
//! 2. a logical path is resolved, creating missing elements
//!    ([`find_or_create`]),
//! 3. a [`FieldSet`] is written into the target element,
//! 4. the changed subtree is rendered at the indentation the file already
//!    uses and spliced into the otherwise untouched text ([`splice`]).
//!
//! Applying the same update twice leaves the file as the first application
//! did.
//!
//! # Example
//!
//! ```rust
//! use xmlsplice::{FieldSet, PluginCoordinates, PluginUpdate, PomUpdater, SpliceConfig};
//!
//! let pom = "<project>\n  <!-- build setup -->\n  <build>\n    <plugins/>\n  </build>\n</project>\n";
//!
//! let update = PluginUpdate::new(PluginCoordinates::new("g1", "a1", "1.0"))
//!     .with_application(FieldSet::new().with("appName", "app1"));
//! let updater = PomUpdater::new(SpliceConfig::default().with_inferred_indent_unit(true));
//!
//! let first = updater.update_text(pom, &update).unwrap();
//! assert!(first.report.changed);
//! assert!(first.text.starts_with("<project>\n  <!-- build setup -->\n  <build>\n    <plugins>\n      <plugin>\n"));
//!
//! let second = updater.update_text(&first.text, &update).unwrap();
//! assert!(!second.report.changed);
//! assert_eq!(second.text, first.text);
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod file;
pub mod indent;
pub mod path;
pub mod plugin;
pub mod splice;
pub mod update;

pub use config::{LineEnding, SpliceConfig};
pub use error::{Error, Result};
pub use fields::{FieldSet, FieldValue};
pub use file::{read_source, update_file, write_atomically};
pub use indent::{base_indent, infer_indent_unit};
pub use path::{NodePath, PathSegment, Predicate, Resolution, find_or_create, find_or_create_at};
pub use plugin::{PluginCoordinates, PluginUpdate, PomUpdater};
pub use splice::{MAX_SENTINEL_ATTEMPTS, SpliceOutcome, splice};
pub use update::{UpdateReport, Updated, update_text};
pub use xmlsplice_xml::IndentUnit;
