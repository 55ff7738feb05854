//! excel-scaffold
//!
//! Compiles spreadsheet schema definitions into Laravel application code.
//!
//! Two pipelines share one row-oriented ingestion layer:
//!
//! - [`schema::SchemaCompiler`] turns column-definition rows into one migration
//!   and one Eloquent model per table, then seeds a controller-directive sheet.
//! - [`controller::ControllerCompiler`] turns directive rows into resource
//!   controllers, form requests and route registrations, patching previously
//!   generated text in place.
//!
//! # Example
//!
//! ```rust,no_run
//! use excel_scaffold::config::ScaffoldConfig;
//! use excel_scaffold::schema::SchemaCompiler;
//! use std::path::Path;
//!
//! # fn example() -> excel_scaffold::Result<()> {
//! let config = ScaffoldConfig::load(Path::new("."), None)?;
//! let compiler = SchemaCompiler::new(&config)?;
//! let report = compiler.run(&config.schema_sheet())?;
//! for action in report.actions() {
//!     println!("{action}");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;
pub mod observability;
pub mod output;
pub mod report;
pub mod scaffold;
pub mod schema;
pub mod sheet;

pub use error::{Result, ScaffoldError};
pub use output::GeneratedFile;
pub use report::{Action, ActionKind, RunReport};
