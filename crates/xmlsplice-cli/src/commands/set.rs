/*
 * set.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Set command implementation.
//!
//! `xmlsplice set` writes values into the element at a slash-separated path
//! of any XML file, creating the path where it does not exist yet.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use xmlsplice::{PathSegment, update_file, update_text};

use super::options::{OutputArgs, library_error, parse_fields, run};

/// Arguments for the set command
#[derive(Debug)]
pub struct SetArgs {
    pub file: PathBuf,
    pub path: String,
    pub set: Vec<String>,
    pub output: OutputArgs,
}

/// Execute the set command
pub fn execute(args: SetArgs) -> Result<()> {
    let segments = PathSegment::parse_path(&args.path).map_err(library_error)?;
    let fields = parse_fields(&args.set)?;
    let config = args.output.splice_config()?;

    if !args.output.dry_run {
        info!("Updating {} in {}", args.path, args.file.display());
    }

    run(
        &args.file,
        &args.output,
        |text| update_text(text, &segments, &fields, &config),
        || update_file(&args.file, &segments, &fields, &config),
    )
}
