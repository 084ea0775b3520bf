/*
 * update.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! The parse, resolve, apply and splice pipeline over a document's text.

use crate::{Error, FieldSet, PathSegment, Result, SpliceConfig, find_or_create, splice};
use serde::Serialize;
use xmlsplice_source_map::Position;
use xmlsplice_xml::XmlDocument;

/// What an update did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    /// False when the document text is unchanged.
    pub changed: bool,

    /// Names of the elements that were created, outermost first.
    pub created: Vec<String>,

    /// Name of the element that was re-rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spliced: Option<String>,

    /// Position of the parsed element the rendered subtree was placed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Position>,
}

/// New document text together with its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Updated {
    pub text: String,
    pub report: UpdateReport,
}

pub(crate) fn parse_text(text: &str) -> Result<XmlDocument> {
    xmlsplice_xml::parse(text).map_err(|source| Error::Parse {
        path: None,
        text: text.to_string(),
        source,
    })
}

/// Write `fields` into the element at `segments`, creating the path as
/// needed, and return the resulting text.
///
/// # Example
///
/// ```rust
/// use xmlsplice::{FieldSet, PathSegment, SpliceConfig, update_text};
///
/// let text = "<settings>\n  <!-- proxy -->\n</settings>\n";
/// let segments = PathSegment::parse_path("servers/server").unwrap();
/// let fields = FieldSet::new().with("id", "central");
/// let config = SpliceConfig::default().with_indent_unit("  ");
///
/// let updated = update_text(text, &segments, &fields, &config).unwrap();
/// assert_eq!(
///     updated.text,
///     "<settings>\n  <!-- proxy -->\n  <servers>\n    <server>\n      <id>central</id>\n    </server>\n  </servers>\n</settings>\n"
/// );
/// assert_eq!(updated.report.created, vec!["servers", "server"]);
/// ```
pub fn update_text(
    text: &str,
    segments: &[PathSegment],
    fields: &FieldSet,
    config: &SpliceConfig,
) -> Result<Updated> {
    let mut doc = parse_text(text)?;
    let resolution = find_or_create(doc.root_mut(), segments)?;
    let target = resolution
        .path
        .resolve_mut(doc.root_mut())
        .ok_or_else(|| Error::InvalidTarget(format!("no element at {}", resolution.path)))?;
    fields.apply_to(target);

    let outcome = splice(doc, &resolution.path, config)?;
    Ok(Updated {
        report: UpdateReport {
            changed: outcome.changed,
            created: resolution.created,
            spliced: outcome.spliced,
            anchor: outcome.anchor,
        },
        text: outcome.text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_update_existing_value() {
        let text = "<c>\n    <!-- keep -->\n    <a>1</a>\n</c>";
        let segments = PathSegment::parse_path("a").unwrap();
        let updated = update_text(text, &segments, &FieldSet::new(), &SpliceConfig::default())
            .unwrap();
        assert!(!updated.report.changed);
        assert_eq!(updated.text, text);
    }

    #[test]
    fn test_report_serializes() {
        let report = UpdateReport {
            changed: true,
            created: vec!["plugin".into()],
            spliced: Some("plugin".into()),
            anchor: Some(Position { line: 3, column: 5 }),
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "changed": true,
                "created": ["plugin"],
                "spliced": "plugin",
                "anchor": {"line": 3, "column": 5},
            })
        );

        let unchanged = serde_json::to_value(UpdateReport::default()).unwrap();
        assert_eq!(unchanged, serde_json::json!({"changed": false, "created": []}));
    }

    #[test]
    fn test_parse_failure_keeps_text() {
        let err = update_text(
            "<a><b></a>",
            &PathSegment::parse_path("b").unwrap(),
            &FieldSet::new(),
            &SpliceConfig::default(),
        )
        .unwrap_err();
        match err {
            Error::Parse { path, text, .. } => {
                assert!(path.is_none());
                assert_eq!(text, "<a><b></a>");
            }
            other => panic!("expected parse error, got {other}"),
        }
    }
}
