//! `rancher-ensure-stack` entrypoint.
//!
//! Exits 0 when the stack already matched, 50 when it was created or
//! updated, 1 on failure.

use std::process::ExitCode;

use clap::Parser;
use rancher_ensure::cli::{run_stack, StackCli};

fn main() -> ExitCode {
    let cli = StackCli::parse();
    run_stack(&cli)
}
