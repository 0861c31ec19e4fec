//! CLI module for the rancher-ensure tools.
//!
//! This module provides the argument definitions, report formatting and
//! the run loop shared by `rancher-ensure-stack` and
//! `rancher-ensure-service`.

mod commands;
mod output;
mod runner;

pub use commands::{CommonArgs, OutputFormat, ServiceCli, StackCli};
pub use output::OutputFormatter;
pub use runner::{ensure_service, ensure_stack, init_logging, run_service, run_stack};
