//! excel-scaffold CLI tool

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use excel_scaffold::config::ScaffoldConfig;
use excel_scaffold::observability::{self, LogFormat};
use excel_scaffold_cli_lib::{ControllerCommand, MigrationCommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "excel-scaffold")]
#[command(version)]
#[command(about = "Generate Laravel code from spreadsheet definitions", long_about = None)]
struct Cli {
    /// Project root every default path resolves against
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Configuration file layered over `<root>/excel-scaffold.toml`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate migrations and models from a schema spreadsheet
    MigrationFromExcel {
        /// Schema spreadsheet (defaults to `paths.schema_sheet`)
        path: Option<PathBuf>,
    },
    /// Generate controllers, form requests and routes from a directive spreadsheet
    ControllerFromExcel {
        /// Directive spreadsheet (defaults to `paths.directive_sheet`)
        path: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> Result<()> {
    let config = ScaffoldConfig::load(&cli.root, cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::MigrationFromExcel { path } => {
            MigrationCommand::new(path).execute(&config)?;
        }
        Commands::ControllerFromExcel { path } => {
            ControllerCommand::new(path).execute(&config)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    observability::init(cli.verbose, format);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
