//! CLI argument definitions.
//!
//! This module defines the arguments of both tools using clap. Flags shared
//! by the two tools live in [`CommonArgs`].

use clap::{Args, Parser};
use std::path::PathBuf;

use crate::planner::ComparePolicy;

/// Ensure a Rancher stack exists with the desired configuration.
///
/// Exits 0 when nothing changed, 50 when the stack was created or
/// updated, 1 on failure.
#[derive(Parser, Debug)]
#[command(name = "rancher-ensure-stack")]
#[command(author, version, about, long_about = None)]
pub struct StackCli {
    /// Name of the environment.
    #[arg(short = 'E', long = "env")]
    pub environment: String,

    /// Name of the stack.
    #[arg(short = 'S', long = "stack-name")]
    pub stack: String,

    /// Description of the stack (defaults to the stack name).
    #[arg(short = 'd', long = "stack-description", visible_alias = "Sd")]
    pub description: Option<String>,

    /// Policy deciding whether an existing stack needs an update.
    #[arg(long, value_enum)]
    pub compare: Option<ComparePolicy>,

    /// Shared options.
    #[command(flatten)]
    pub common: CommonArgs,
}

impl StackCli {
    /// Description to send, the stack name when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.stack)
    }
}

/// Ensure Rancher services exist in a stack.
///
/// Existing services are left untouched. Exits 0 when nothing changed,
/// 50 when at least one service was created, 1 on failure.
#[derive(Parser, Debug)]
#[command(name = "rancher-ensure-service")]
#[command(author, version, about, long_about = None)]
pub struct ServiceCli {
    /// Name of the environment.
    #[arg(short = 'E', long = "env")]
    pub environment: String,

    /// Name of the stack.
    #[arg(short = 'S', long = "stack-name")]
    pub stack: String,

    /// Name of a service; repeat or list several.
    #[arg(short = 's', long = "service-name", required = true, num_args = 1..)]
    pub services: Vec<String>,

    /// Image of created services, overriding the settings file.
    #[arg(long)]
    pub image: Option<String>,

    /// Report existing services whose launch config differs.
    #[arg(long)]
    pub check_drift: bool,

    /// Shared options.
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by both tools.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to the settings file.
    #[arg(short, long, env = "RANCHER_ENSURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Rancher server URL.
    #[arg(long)]
    pub url: Option<String>,

    /// Rancher API access key.
    #[arg(long)]
    pub access_key: Option<String>,

    /// Rancher API secret key.
    #[arg(long)]
    pub secret_key: Option<String>,

    /// Rancher API version path segment (default `v2-beta`).
    #[arg(long)]
    pub api_version: Option<String>,

    /// Request timeout in seconds (no timeout by default).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Resolve and compare, but send no create or update.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}
