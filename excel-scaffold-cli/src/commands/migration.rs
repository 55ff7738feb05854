//! `migration-from-excel`: migrations and models from a schema sheet

use anyhow::{Context, Result};
use console::style;
use excel_scaffold::config::ScaffoldConfig;
use excel_scaffold::schema::SchemaCompiler;
use excel_scaffold::{ActionKind, RunReport};
use std::path::PathBuf;

use super::{input_path, print_report, spinner};

/// Generate migrations and models
pub struct MigrationCommand {
    path: Option<PathBuf>,
}

impl MigrationCommand {
    /// Command reading `path`, or the configured schema sheet when `None`
    #[must_use]
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Run the schema compiler and print what it did
    ///
    /// # Errors
    ///
    /// Returns an error if the schema sheet is missing or the run aborts.
    pub fn execute(&self, config: &ScaffoldConfig) -> Result<RunReport> {
        let input = input_path(self.path.as_deref(), config.schema_sheet());

        println!(
            "\n{} {}",
            style("Generating migrations from").cyan().bold(),
            style(input.display()).green().bold()
        );

        let compiler =
            SchemaCompiler::new(config).context("Failed to create schema compiler")?;

        let spinner = spinner(format!("Reading {}", input.display()))?;
        let result = compiler.run(&input);
        spinner.finish_and_clear();
        let report = result.with_context(|| format!("Failed to compile {}", input.display()))?;
        tracing::info!(
            input = %input.display(),
            actions = report.actions().len(),
            warnings = report.count(ActionKind::Warning),
            "schema compile finished"
        );

        print_report(&report);

        println!(
            "\n{} {} migration(s) and models generated",
            style("✨").green().bold(),
            report
                .actions()
                .iter()
                .filter(|a| {
                    matches!(a.kind, ActionKind::Created | ActionKind::Overwritten)
                        && a.subject.ends_with("_table.php")
                })
                .count()
        );

        println!("\n{}", style("Next steps:").cyan().bold());
        println!(
            "  1. Fill in {}",
            style(config.directive_sheet().display()).yellow()
        );
        println!(
            "  2. Run {}",
            style("excel-scaffold controller-from-excel").yellow()
        );

        Ok(report)
    }
}
