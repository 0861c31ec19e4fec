//! Output formatting for reconciliation reports.
//!
//! Text output is meant for a terminal, JSON output for scripts that want
//! more than the exit code.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::reconciler::{Outcome, ReconcileReport};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Resource row for table display.
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Returns true if the output is meant for scripts.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Formats a reconciliation report for display.
    #[must_use]
    pub fn format_report(&self, report: &ReconcileReport) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Text => Self::format_report_text(report),
        }
    }

    fn format_report_text(report: &ReconcileReport) -> String {
        let mut output = String::new();

        let mode = if report.dry_run {
            format!(" {}", "(dry run)".dimmed())
        } else {
            String::new()
        };
        let _ = writeln!(
            output,
            "\nStack {}/{}{mode}\n",
            report.environment.bold(),
            report.stack.bold()
        );

        let rows: Vec<ResourceRow> = report
            .resources
            .iter()
            .map(|r| ResourceRow {
                kind: r.kind.to_string(),
                name: r.name.clone(),
                outcome: Self::format_outcome(r.outcome),
                id: r.id.clone().unwrap_or_else(|| String::from("-")),
            })
            .collect();

        if !rows.is_empty() {
            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        let _ = writeln!(
            output,
            "\n{} created, {} updated, {} unchanged, {} drifted",
            report.count(Outcome::Created).to_string().green(),
            report.count(Outcome::Updated).to_string().yellow(),
            report.count(Outcome::Unchanged),
            report.count(Outcome::Drifted).to_string().red()
        );

        if report.changed() {
            let _ = writeln!(output, "{} Changes applied", "✓".green());
        } else {
            let _ = writeln!(output, "{} No changes required", "✓".green());
        }

        output
    }

    /// Formats an outcome with color.
    fn format_outcome(outcome: Outcome) -> String {
        match outcome {
            Outcome::Created => "created".green().to_string(),
            Outcome::Updated => "updated".yellow().to_string(),
            Outcome::Unchanged => "unchanged".dimmed().to_string(),
            Outcome::Drifted => "drifted".red().to_string(),
        }
    }
}
