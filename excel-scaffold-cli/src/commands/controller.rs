//! `controller-from-excel`: controllers, requests and routes from a directive sheet

use anyhow::{Context, Result};
use console::style;
use excel_scaffold::config::ScaffoldConfig;
use excel_scaffold::controller::ControllerCompiler;
use excel_scaffold::{ActionKind, RunReport};
use std::path::PathBuf;

use super::{input_path, print_report, spinner};

/// Generate controllers, form requests and routes
pub struct ControllerCommand {
    path: Option<PathBuf>,
}

impl ControllerCommand {
    /// Command reading `path`, or the configured directive sheet when `None`
    #[must_use]
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Run the controller compiler and print what it did
    ///
    /// # Errors
    ///
    /// Returns an error if the directive sheet is missing or unreadable.
    pub fn execute(&self, config: &ScaffoldConfig) -> Result<RunReport> {
        let input = input_path(self.path.as_deref(), config.directive_sheet());

        println!(
            "\n{} {}",
            style("Generating controllers from").cyan().bold(),
            style(input.display()).green().bold()
        );

        let compiler =
            ControllerCompiler::new(config).context("Failed to create controller compiler")?;

        let spinner = spinner(format!("Reading {}", input.display()))?;
        let result = compiler.run(&input);
        spinner.finish_and_clear();
        let report = result.with_context(|| format!("Failed to compile {}", input.display()))?;
        tracing::info!(
            input = %input.display(),
            actions = report.actions().len(),
            warnings = report.count(ActionKind::Warning),
            "controller compile finished"
        );

        print_report(&report);

        println!(
            "\n{} Controller and FormRequest generation completed",
            style("✨").green().bold()
        );

        Ok(report)
    }
}
