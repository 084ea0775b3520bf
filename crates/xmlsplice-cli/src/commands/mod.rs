/*
 * mod.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! Command implementations for the xmlsplice CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! xmlsplice library for the actual update.

pub mod options;
pub mod plugin;
pub mod set;
