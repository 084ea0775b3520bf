/*
 * fields.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Named values mapped onto child elements.

use serde::{Deserialize, Serialize};
use xmlsplice_xml::XmlElement;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    /// Leave the field alone: nothing is written for it.
    Absent,
}

impl FieldValue {
    /// Element text for this value, or None for [`FieldValue::Absent`].
    pub fn render(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Integer(n) => Some(n.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Absent => None,
        }
    }

    /// Type a value given as plain text: `true`/`false` become booleans,
    /// decimal integers become integers, anything else stays a string.
    pub fn infer(text: &str) -> Self {
        match text {
            "true" => FieldValue::Boolean(true),
            "false" => FieldValue::Boolean(false),
            _ => text
                .parse::<i64>()
                .map_or_else(|_| FieldValue::String(text.to_string()), FieldValue::Integer),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Absent, Into::into)
    }
}

/// An ordered set of named values.
///
/// Applied to an element, each present field updates (or appends) the child
/// element with the same name. Absent fields are skipped entirely, so a
/// `FieldSet` only ever touches the children it has a value for.
///
/// # Example
///
/// ```rust
/// use xmlsplice::FieldSet;
///
/// let fields = FieldSet::new()
///     .with("appName", "demo")
///     .with("instanceCount", 2)
///     .with("isPublic", None::<bool>);
///
/// let rendered: Vec<_> = fields.rendered().collect();
/// assert_eq!(rendered, vec![("appName", "demo".to_string()), ("instanceCount", "2".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    fields: Vec<(String, FieldValue)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field. An existing field keeps its position; a new one goes
    /// last.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Present fields with their element text, in order.
    pub fn rendered(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.fields
            .iter()
            .filter_map(|(n, v)| v.render().map(|text| (n.as_str(), text)))
    }

    /// Write the present fields into `element`'s children.
    ///
    /// The first child named after a field gets its text replaced; fields
    /// without a matching child are appended in order. Returns the number
    /// of children that were changed or created, which is zero when the
    /// element already holds every value.
    pub fn apply_to(&self, element: &mut XmlElement) -> usize {
        let mut changed = 0;
        for (name, text) in self.rendered() {
            match element.position_of_child(name) {
                Some(index) => {
                    let Some(child) = element.child_element_mut(index) else {
                        continue;
                    };
                    if child.set_text(&text) {
                        tracing::debug!(parent = element.name(), field = name, "updated field");
                        changed += 1;
                    }
                }
                None => {
                    element.append_child(XmlElement::with_text(name, &text));
                    tracing::debug!(parent = element.name(), field = name, "added field");
                    changed += 1;
                }
            }
        }
        changed
    }
}

impl<K, V> FromIterator<(K, V)> for FieldSet
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FieldSet::new();
        for (name, value) in iter {
            fields.set(name, value);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlsplice_xml::{XmlNode, parse};

    #[test]
    fn test_render_each_variant() {
        assert_eq!(FieldValue::from("a b").render().as_deref(), Some("a b"));
        assert_eq!(FieldValue::from(-3).render().as_deref(), Some("-3"));
        assert_eq!(FieldValue::from(true).render().as_deref(), Some("true"));
        assert_eq!(FieldValue::Absent.render(), None);
        assert!(FieldValue::from(None::<i64>).is_absent());
    }

    #[test]
    fn test_infer_types() {
        assert_eq!(FieldValue::infer("false"), FieldValue::Boolean(false));
        assert_eq!(FieldValue::infer("42"), FieldValue::Integer(42));
        assert_eq!(FieldValue::infer("-7"), FieldValue::Integer(-7));
        assert_eq!(FieldValue::infer("1.5"), FieldValue::String("1.5".into()));
        assert_eq!(FieldValue::infer("True"), FieldValue::String("True".into()));
        assert_eq!(FieldValue::infer(""), FieldValue::String(String::new()));
    }

    #[test]
    fn test_set_keeps_position() {
        let mut fields = FieldSet::new().with("a", 1).with("b", 2);
        fields.set("a", 3);
        let names: Vec<&str> = fields.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(fields.get("a"), Some(&FieldValue::Integer(3)));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_apply_appends_missing_fields_in_order() {
        let mut element = XmlElement::new("configuration");
        let fields = FieldSet::new()
            .with("subscriptionId", "sub1")
            .with("isPublic", FieldValue::Absent)
            .with("appName", "app1");

        assert_eq!(fields.apply_to(&mut element), 2);
        let names: Vec<&str> = element.child_elements().map(|(_, e)| e.name()).collect();
        assert_eq!(names, vec!["subscriptionId", "appName"]);
        assert_eq!(element.child_text("appName").as_deref(), Some("app1"));
    }

    #[test]
    fn test_apply_updates_first_match_in_place() {
        let mut doc = parse("<c>\n  <a>1</a>\n  <b>x</b>\n  <a>2</a>\n</c>").unwrap();
        let fields = FieldSet::new().with("a", 9);

        assert_eq!(fields.apply_to(doc.root_mut()), 1);
        let texts: Vec<String> = doc
            .root()
            .child_elements()
            .map(|(_, e)| e.text())
            .collect();
        assert_eq!(texts, vec!["9", "x", "2"]);
        assert!(!doc.root().is_modified());
    }

    #[test]
    fn test_apply_same_values_changes_nothing() {
        let mut doc = parse("<c><a>1</a><flag>true</flag></c>").unwrap();
        let fields = FieldSet::new().with("a", 1).with("flag", true);

        assert_eq!(fields.apply_to(doc.root_mut()), 0);
        assert!(doc.root().is_pristine());
    }

    #[test]
    fn test_absent_fields_never_touch_element() {
        let mut doc = parse("<c><a>1</a></c>").unwrap();
        let fields = FieldSet::new().with("a", None::<String>).with("b", None::<i64>);

        assert_eq!(fields.apply_to(doc.root_mut()), 0);
        assert!(doc.root().is_pristine());
        assert!(matches!(doc.root().children()[0], XmlNode::Element(_)));
    }

    #[test]
    fn test_collect_from_pairs() {
        let fields: FieldSet = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(fields.len(), 2);
    }
}
