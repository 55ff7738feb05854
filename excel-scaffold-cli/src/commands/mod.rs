//! CLI command implementations

pub mod controller;
pub mod migration;

pub use controller::ControllerCommand;
pub use migration::MigrationCommand;

use anyhow::{Context, Result};
use console::style;
use excel_scaffold::{ActionKind, RunReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Explicit input as given, else the configured default
fn input_path(explicit: Option<&Path>, default: PathBuf) -> PathBuf {
    explicit.map_or(default, Path::to_path_buf)
}

fn spinner(message: String) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(spinner)
}

/// Print every recorded action, one per line
pub fn print_report(report: &RunReport) {
    for action in report.actions() {
        let marker = match action.kind {
            ActionKind::Created => style("✓").green(),
            ActionKind::Overwritten => style("↻").yellow(),
            ActionKind::Patched => style("✎").cyan(),
            ActionKind::AlreadyExists | ActionKind::Skipped => style("•").dim(),
            ActionKind::Warning => style("!").yellow().bold(),
        };
        println!(
            "  {} {} {} ({})",
            marker,
            style(action.kind.label()).bold(),
            style(&action.subject).dim(),
            action.message
        );
    }

    let warnings = report.count(ActionKind::Warning);
    if warnings > 0 {
        println!(
            "\n{} {} warning(s)",
            style("⚠").yellow().bold(),
            warnings
        );
    }
}
