/*
 * path.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Finding, and creating where missing, the element a logical path names.

use crate::{Error, FieldSet, Result};
use std::fmt;
use xmlsplice_xml::XmlElement;

/// Extra condition a candidate element has to satisfy, beyond its name.
pub type Predicate = Box<dyn Fn(&XmlElement) -> bool>;

/// One step of a logical path.
pub struct PathSegment {
    name: String,
    predicate: Option<Predicate>,
    seed: Option<FieldSet>,
}

impl PathSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            predicate: None,
            seed: None,
        }
    }

    /// Only accept children for which `predicate` holds.
    pub fn matching(mut self, predicate: impl Fn(&XmlElement) -> bool + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Fields written into the element when this segment has to be created.
    pub fn seeded(mut self, seed: FieldSet) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, element: &XmlElement) -> bool {
        element.name() == self.name && self.predicate.as_ref().is_none_or(|p| p(element))
    }

    fn create(&self) -> XmlElement {
        let mut element = XmlElement::new(self.name.as_str());
        if let Some(seed) = &self.seed {
            seed.apply_to(&mut element);
        }
        element
    }

    /// Split a slash-separated path such as `build/plugins/plugin` into
    /// plain name segments.
    pub fn parse_path(path: &str) -> Result<Vec<PathSegment>> {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(Error::InvalidTarget("empty path".to_string()));
        }
        trimmed
            .split('/')
            .map(|name| {
                let name = name.trim();
                if is_valid_name(name) {
                    Ok(PathSegment::new(name))
                } else {
                    Err(Error::InvalidTarget(format!(
                        "{name:?} in {path:?} is not an element name"
                    )))
                }
            })
            .collect()
    }
}

impl fmt::Debug for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathSegment")
            .field("name", &self.name)
            .field("predicate", &self.predicate.is_some())
            .field("seed", &self.seed)
            .finish()
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

/// Child indices leading from the root element to a descendant.
///
/// Indices refer to [`XmlElement::children`], so they count text and
/// comment nodes too. A path stays valid as long as no earlier sibling on
/// the way is inserted or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The path of the root element itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    /// The first `depth` steps of this path.
    pub fn truncated(&self, depth: usize) -> Self {
        Self(self.0[..depth.min(self.0.len())].to_vec())
    }

    pub fn last_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn resolve<'a>(&self, root: &'a XmlElement) -> Option<&'a XmlElement> {
        self.0.iter().try_fold(root, |element, &index| {
            element.children().get(index)?.as_element()
        })
    }

    /// Mutable access to the addressed element.
    ///
    /// Walking the path does not flag any element on the way as modified.
    pub fn resolve_mut<'a>(&self, root: &'a mut XmlElement) -> Option<&'a mut XmlElement> {
        self.0
            .iter()
            .try_fold(root, |element, &index| element.child_element_mut(index))
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("/"))
    }
}

/// Where a path led, and what had to be created to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Path of the final element.
    pub path: NodePath,

    /// Depth of the first element that was created, if any.
    pub created_from: Option<usize>,

    /// Names of the created elements, outermost first.
    pub created: Vec<String>,
}

impl Resolution {
    /// Path of the outermost created element.
    pub fn first_created(&self) -> Option<NodePath> {
        self.created_from
            .map(|depth| self.path.truncated(depth + 1))
    }
}

/// Walk `segments` down from the root, creating whatever is missing.
pub fn find_or_create(root: &mut XmlElement, segments: &[PathSegment]) -> Result<Resolution> {
    find_or_create_at(root, &NodePath::root(), segments)
}

/// Walk `segments` down from the element at `start`.
///
/// At each step the first child, in document order, that matches the
/// segment is taken. Without one, a new element is appended as the last
/// child of the current element. Once an element is created, everything
/// below it is created too.
pub fn find_or_create_at(
    root: &mut XmlElement,
    start: &NodePath,
    segments: &[PathSegment],
) -> Result<Resolution> {
    if segments.is_empty() {
        return Err(Error::InvalidTarget("empty path".to_string()));
    }

    let mut current = start
        .resolve_mut(root)
        .ok_or_else(|| Error::InvalidTarget(format!("no element at {start}")))?;
    let mut path = start.clone();
    let mut created_from = None;
    let mut created = Vec::new();

    for segment in segments {
        let existing = current
            .child_elements()
            .find(|(_, child)| segment.matches(child))
            .map(|(index, _)| index);

        let index = match existing {
            Some(index) => {
                tracing::debug!(element = segment.name(), %path, "reusing existing element");
                index
            }
            None => {
                tracing::debug!(element = segment.name(), %path, "creating element");
                if created_from.is_none() {
                    created_from = Some(path.depth());
                }
                created.push(segment.name().to_string());
                current.append_child(segment.create())
            }
        };

        path = path.child(index);
        current = current
            .child_element_mut(index)
            .ok_or_else(|| Error::InvalidTarget(format!("no element at {path}")))?;
    }

    Ok(Resolution {
        path,
        created_from,
        created,
    })
}
