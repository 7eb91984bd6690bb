//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "flankci")]
#[command(about = "CI dashboard backend for selecting and re-running instrumented tests", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to flankci.yaml + flankci.local.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the dashboard HTTP API
    Serve(ServeArgs),

    /// List branches and builds of the test-artifact workflow
    Builds,

    /// Show the selectable test hierarchy of an artifact or manifest
    Tests(TestsArgs),

    /// List the failed tests of a previous run
    Rerun(RerunArgs),

    /// List runs of the test workflow
    Results,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct TestsArgs {
    /// Build slug holding the test artifact
    #[arg(long, requires = "artifact", conflicts_with = "manifest")]
    pub build: Option<String>,

    /// Artifact slug of the test-method manifest
    #[arg(long, requires = "build")]
    pub artifact: Option<String>,

    /// Local test-method manifest instead of a CI artifact
    #[arg(long, required_unless_present = "build")]
    pub manifest: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RerunArgs {
    /// Slug of the test run to inspect
    pub build_slug: String,
}
