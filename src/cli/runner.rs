//! Entry points shared by the two binaries.
//!
//! Each run loads and validates settings, talks to Rancher once through a
//! reconciler, prints the report and maps it to a process exit code.

use std::future::Future;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigParser, ConfigValidator, RancherConnection, Settings};
use crate::error::Result;
use crate::rancher::RancherClient;
use crate::reconciler::{ReconcileReport, ServiceReconciler, StackReconciler, EXIT_FAILURE};

use super::commands::{CommonArgs, ServiceCli, StackCli};
use super::output::OutputFormatter;

/// Initializes the logging system.
///
/// Logs go to stderr so JSON reports on stdout stay parseable.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs `rancher-ensure-stack`.
#[must_use]
pub fn run_stack(cli: &StackCli) -> ExitCode {
    init_logging(cli.common.verbose);
    execute(&cli.common, ensure_stack(cli))
}

/// Runs `rancher-ensure-service`.
#[must_use]
pub fn run_service(cli: &ServiceCli) -> ExitCode {
    init_logging(cli.common.verbose);
    execute(&cli.common, ensure_service(cli))
}

/// Drives a reconciliation on a fresh runtime and reports its result.
fn execute(common: &CommonArgs, job: impl Future<Output = Result<ReconcileReport>>) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match runtime.block_on(job) {
        Ok(report) => {
            emit(&OutputFormatter::new(common.output), &report);
            ExitCode::from(report.exit_code())
        }
        Err(e) => {
            error!("Reconciliation failed");
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn emit(formatter: &OutputFormatter, report: &ReconcileReport) {
    let rendered = formatter.format_report(report);
    if formatter.is_json() {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{rendered}") {
            debug!("Failed to write report: {e}");
        }
    } else {
        eprint!("{rendered}");
    }
}

/// Ensures the stack named on the command line.
///
/// # Errors
///
/// Returns an error if settings are invalid or reconciliation fails.
pub async fn ensure_stack(cli: &StackCli) -> Result<ReconcileReport> {
    let validator = ConfigValidator::new();
    validator.validate_name("environment name", &cli.environment)?;
    validator.validate_name("stack name", &cli.stack)?;

    let settings = load_settings(&cli.common)?;
    let client = connect(&validator, &settings)?;

    let policy = cli.compare.unwrap_or(settings.stack.compare);
    debug!("Comparing stacks with the {policy} policy");
    let desired = settings.stack.payload(&cli.stack, cli.description());

    StackReconciler::new(&client)
        .with_policy(policy)
        .with_dry_run(cli.common.dry_run)
        .reconcile(&cli.environment, &desired)
        .await
}

/// Ensures the services named on the command line.
///
/// # Errors
///
/// Returns an error if settings are invalid or reconciliation fails.
pub async fn ensure_service(cli: &ServiceCli) -> Result<ReconcileReport> {
    let validator = ConfigValidator::new();
    validator.validate_name("environment name", &cli.environment)?;
    validator.validate_name("stack name", &cli.stack)?;
    for service in &cli.services {
        validator.validate_name("service name", service)?;
    }

    let mut settings = load_settings(&cli.common)?;
    if let Some(image) = &cli.image {
        settings.service.image.clone_from(image);
    }
    let client = connect(&validator, &settings)?;

    ServiceReconciler::new(&client, &settings.service)
        .with_dry_run(cli.common.dry_run)
        .with_drift_check(cli.check_drift)
        .reconcile(&cli.environment, &cli.stack, &cli.services)
        .await
}

/// Loads settings: file, then `.env` and environment, then flags.
///
/// `.env` is read next to an explicit settings file, otherwise from the
/// working directory.
fn load_settings(common: &CommonArgs) -> Result<Settings> {
    let parser = match common.config.as_deref().and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => ConfigParser::new().with_base_path(dir),
        _ => ConfigParser::new(),
    };
    parser.load_dotenv()?;

    let mut settings = parser.load(common.config.as_deref())?;
    ConfigParser::apply_env_overrides(&mut settings);
    apply_cli_overrides(&mut settings, common);
    Ok(settings)
}

fn apply_cli_overrides(settings: &mut Settings, common: &CommonArgs) {
    if let Some(url) = &common.url {
        settings.rancher.url = Some(url.clone());
    }
    if let Some(key) = &common.access_key {
        settings.rancher.access_key = Some(key.clone());
    }
    if let Some(secret) = &common.secret_key {
        settings.rancher.secret_key = Some(secret.clone());
    }
    if let Some(version) = &common.api_version {
        settings.rancher.api_version.clone_from(version);
    }
    if common.timeout.is_some() {
        settings.rancher.timeout_secs = common.timeout;
    }
}

fn connect(validator: &ConfigValidator, settings: &Settings) -> Result<RancherClient> {
    let connection: RancherConnection = validator.validate(settings)?;
    debug!("Connecting to {}", connection.url);
    RancherClient::new(&connection)
}
