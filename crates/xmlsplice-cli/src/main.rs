/*
 * main.rs
 * Copyright (c) 2026 xmlsplice contributors
 */

//! xmlsplice CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::options::OutputArgs;

#[derive(Parser)]
#[command(name = "xmlsplice")]
#[command(version)]
#[command(about = "Update one part of an XML file without reformatting the rest", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add or update a Maven plugin's configuration in a POM file
    Plugin {
        /// POM file to update
        pom: PathBuf,

        /// Plugin groupId
        #[arg(long)]
        group_id: String,

        /// Plugin artifactId
        #[arg(long)]
        artifact_id: String,

        /// Plugin version
        #[arg(long)]
        plugin_version: String,

        /// Value for the plugin's <configuration> (KEY=VALUE)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Value for the plugin's <configuration><deployment> (KEY=VALUE)
        #[arg(long = "deploy", value_name = "KEY=VALUE")]
        deploy: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write values into the element at a path, creating it if needed
    Set {
        /// XML file to update
        file: PathBuf,

        /// Slash-separated element path below the root (e.g. build/plugins)
        #[arg(long, value_name = "PATH")]
        path: String,

        /// Child element value (KEY=VALUE)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xmlsplice=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plugin {
            pom,
            group_id,
            artifact_id,
            plugin_version,
            set,
            deploy,
            output,
        } => commands::plugin::execute(commands::plugin::PluginArgs {
            pom,
            group_id,
            artifact_id,
            plugin_version,
            set,
            deploy,
            output,
        }),
        Commands::Set {
            file,
            path,
            set,
            output,
        } => commands::set::execute(commands::set::SetArgs {
            file,
            path,
            set,
            output,
        }),
    }
}
