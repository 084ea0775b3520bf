/*
 * plugin.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Maven plugin configuration in `pom.xml`.
//!
//! A [`PluginUpdate`] names a plugin by its coordinates and carries the
//! fields for its `<configuration>` and `<configuration><deployment>`
//! blocks. [`PomUpdater`] finds the plugin under `build/plugins` (adding
//! any missing level) and splices the result into the file.

use crate::file::{commit, read_source};
use crate::update::parse_text;
use crate::{
    Error, FieldSet, NodePath, PathSegment, Result, SpliceConfig, UpdateReport, Updated,
    find_or_create, find_or_create_at, splice,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use xmlsplice_xml::{XmlDocument, XmlElement};

/// groupId, artifactId and version of a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl PluginCoordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Whether a `<plugin>` element declares this plugin.
    ///
    /// groupId and artifactId must match. The version only has to match
    /// when the element declares one; an unversioned entry matches any
    /// version.
    pub fn matches(&self, plugin: &XmlElement) -> bool {
        plugin.child_text("groupId").as_deref() == Some(self.group_id.as_str())
            && plugin.child_text("artifactId").as_deref() == Some(self.artifact_id.as_str())
            && plugin
                .child_text("version")
                .is_none_or(|version| version == self.version)
    }

    /// The identity children written into a newly created `<plugin>`.
    pub fn seed(&self) -> FieldSet {
        FieldSet::new()
            .with("groupId", self.group_id.as_str())
            .with("artifactId", self.artifact_id.as_str())
            .with("version", self.version.as_str())
    }

    /// Path segment that finds this plugin, or creates it with its
    /// identity children.
    pub fn segment(&self) -> PathSegment {
        let coordinates = self.clone();
        PathSegment::new("plugin")
            .matching(move |element| coordinates.matches(element))
            .seeded(self.seed())
    }
}

/// A change to one plugin's configuration.
///
/// `None` for either block means the block is left alone; the plugin
/// element itself is still created if it is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginUpdate {
    pub coordinates: PluginCoordinates,
    pub application: Option<FieldSet>,
    pub deployment: Option<FieldSet>,
}

impl PluginUpdate {
    pub fn new(coordinates: PluginCoordinates) -> Self {
        Self {
            coordinates,
            application: None,
            deployment: None,
        }
    }

    /// Fields for the plugin's `<configuration>`.
    pub fn with_application(mut self, fields: FieldSet) -> Self {
        self.application = Some(fields);
        self
    }

    /// Fields for the plugin's `<configuration><deployment>`.
    ///
    /// Only the given fields are written. No resource defaults are filled
    /// in, so a new deployment needs `cpu` and `memoryInGB` from the caller
    /// if it should carry them.
    pub fn with_deployment(mut self, fields: FieldSet) -> Self {
        self.deployment = Some(fields);
        self
    }
}

/// Applies [`PluginUpdate`]s to POM files.
#[derive(Debug, Clone, Default)]
pub struct PomUpdater {
    config: SpliceConfig,
}

impl PomUpdater {
    pub fn new(config: SpliceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SpliceConfig {
        &self.config
    }

    /// Compute the new POM text without touching any file.
    pub fn update_text(&self, text: &str, update: &PluginUpdate) -> Result<Updated> {
        let mut doc = parse_text(text)?;
        let mut created = Vec::new();

        let plugin_segments = [
            PathSegment::new("build"),
            PathSegment::new("plugins"),
            update.coordinates.segment(),
        ];
        let plugin = find_or_create(doc.root_mut(), &plugin_segments)?;
        tracing::debug!(
            group_id = %update.coordinates.group_id,
            artifact_id = %update.coordinates.artifact_id,
            reused = plugin.created.is_empty(),
            "resolved plugin"
        );
        created.extend(plugin.created);

        let target = if update.application.is_some() || update.deployment.is_some() {
            let configuration = find_or_create_at(
                doc.root_mut(),
                &plugin.path,
                &[PathSegment::new("configuration")],
            )?;
            created.extend(configuration.created);

            if let Some(fields) = &update.application {
                fields.apply_to(element_at(&mut doc, &configuration.path)?);
            }
            if let Some(fields) = &update.deployment {
                let deployment = find_or_create_at(
                    doc.root_mut(),
                    &configuration.path,
                    &[PathSegment::new("deployment")],
                )?;
                created.extend(deployment.created);
                fields.apply_to(element_at(&mut doc, &deployment.path)?);
            }
            configuration.path
        } else {
            plugin.path
        };

        let outcome = splice(doc, &target, &self.config)?;
        Ok(Updated {
            report: UpdateReport {
                changed: outcome.changed,
                created,
                spliced: outcome.spliced,
                anchor: outcome.anchor,
            },
            text: outcome.text,
        })
    }

    /// Update a POM file in place. Nothing is written when the file already
    /// holds the requested configuration.
    pub fn update_file(&self, path: &Path, update: &PluginUpdate) -> Result<UpdateReport> {
        let text = read_source(path)?;
        let updated = self
            .update_text(&text, update)
            .map_err(|e| e.with_path(path))?;
        commit(path, updated)
    }
}

fn element_at<'a>(doc: &'a mut XmlDocument, path: &NodePath) -> Result<&'a mut XmlElement> {
    path.resolve_mut(doc.root_mut())
        .ok_or_else(|| Error::InvalidTarget(format!("no element at {path}")))
}
