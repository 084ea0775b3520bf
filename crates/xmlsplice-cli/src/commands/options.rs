/*
 * options.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Arguments and output handling shared by all commands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use xmlsplice::{FieldSet, FieldValue, SpliceConfig, UpdateReport, Updated};

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Splice settings file (TOML)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Derive the indent unit from the file instead of the settings
    #[arg(long)]
    pub infer_indent: bool,

    /// Print the updated document instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Print a JSON report of the update
    #[arg(long)]
    pub json: bool,
}

impl OutputArgs {
    pub fn splice_config(&self) -> Result<SpliceConfig> {
        let config = match &self.settings {
            Some(path) => SpliceConfig::load(path)?,
            None => SpliceConfig::default(),
        };
        if self.infer_indent {
            return Ok(config.with_inferred_indent_unit(true));
        }
        Ok(config)
    }

    /// Print what the command produced.
    ///
    /// In a dry run the new text goes to stdout (followed by the report in
    /// JSON mode). Otherwise only the JSON report is printed, if asked for.
    pub fn emit(&self, text: Option<&str>, report: &UpdateReport) -> Result<()> {
        if let Some(text) = text {
            print!("{text}");
        }
        if self.json {
            let json =
                serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            println!("{json}");
        }
        Ok(())
    }
}

/// Split `KEY=VALUE`, typing the value.
pub fn parse_assignment(assignment: &str) -> Result<(String, FieldValue)> {
    let (key, value) = assignment
        .split_once('=')
        .with_context(|| format!("Expected KEY=VALUE, got '{assignment}'"))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Missing key in '{assignment}'");
    }
    Ok((key.to_string(), FieldValue::infer(value)))
}

/// Build a field set from `KEY=VALUE` arguments, in the order given.
pub fn parse_fields(assignments: &[String]) -> Result<FieldSet> {
    let mut fields = FieldSet::new();
    for assignment in assignments {
        let (key, value) = parse_assignment(assignment)?;
        fields.set(key, value);
    }
    Ok(fields)
}

/// Turn a library error into an anyhow error, printing parse errors as an
/// annotated source report first.
pub fn library_error(err: xmlsplice::Error) -> anyhow::Error {
    if let Some(report) = err.report() {
        eprintln!("{report}");
    }
    anyhow::Error::new(err)
}

/// Run an update in dry-run or write mode.
pub fn run(
    path: &Path,
    output: &OutputArgs,
    preview: impl FnOnce(&str) -> xmlsplice::Result<Updated>,
    write: impl FnOnce() -> xmlsplice::Result<UpdateReport>,
) -> Result<()> {
    if output.dry_run {
        let text = xmlsplice::read_source(path).map_err(library_error)?;
        let updated = preview(&text)
            .map_err(|e| e.with_path(path))
            .map_err(library_error)?;
        tracing::debug!(changed = updated.report.changed, "dry run, not writing");
        return output.emit(Some(&updated.text), &updated.report);
    }

    let report = write().map_err(library_error)?;
    output.emit(None, &report)
}
