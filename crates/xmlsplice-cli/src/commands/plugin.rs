/*
 * plugin.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Plugin command implementation.
//!
//! `xmlsplice plugin` makes sure a POM declares a Maven plugin and writes
//! the given values into its `<configuration>` and
//! `<configuration><deployment>` blocks.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use xmlsplice::{PluginCoordinates, PluginUpdate, PomUpdater};

use super::options::{OutputArgs, parse_fields, run};

/// Arguments for the plugin command
#[derive(Debug)]
pub struct PluginArgs {
    pub pom: PathBuf,
    pub group_id: String,
    pub artifact_id: String,
    pub plugin_version: String,
    pub set: Vec<String>,
    pub deploy: Vec<String>,
    pub output: OutputArgs,
}

/// Execute the plugin command
pub fn execute(args: PluginArgs) -> Result<()> {
    let update = build_update(&args)?;
    let updater = PomUpdater::new(args.output.splice_config()?);

    if !args.output.dry_run {
        info!(
            "Updating {}:{} in {}",
            update.coordinates.group_id,
            update.coordinates.artifact_id,
            args.pom.display()
        );
    }

    run(
        &args.pom,
        &args.output,
        |text| updater.update_text(text, &update),
        || updater.update_file(&args.pom, &update),
    )
}

fn build_update(args: &PluginArgs) -> Result<PluginUpdate> {
    let coordinates = PluginCoordinates::new(
        args.group_id.as_str(),
        args.artifact_id.as_str(),
        args.plugin_version.as_str(),
    );
    let mut update = PluginUpdate::new(coordinates);
    if !args.set.is_empty() {
        update = update.with_application(parse_fields(&args.set)?);
    }
    if !args.deploy.is_empty() {
        update = update.with_deployment(parse_fields(&args.deploy)?);
    }
    Ok(update)
}
