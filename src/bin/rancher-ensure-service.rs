//! `rancher-ensure-service` entrypoint.
//!
//! Exits 0 when every service already existed, 50 when at least one was
//! created, 1 on failure.

use std::process::ExitCode;

use clap::Parser;
use rancher_ensure::cli::{run_service, ServiceCli};

fn main() -> ExitCode {
    let cli = ServiceCli::parse();
    run_service(&cli)
}
