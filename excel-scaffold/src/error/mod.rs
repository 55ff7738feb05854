//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Library error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Input spreadsheet does not exist
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Spreadsheet could not be opened or parsed
    #[error("Failed to read spreadsheet {}: {source}", path.display())]
    SheetRead {
        /// Spreadsheet path
        path: PathBuf,
        /// Underlying reader error
        #[source]
        source: calamine::Error,
    },

    /// Spreadsheet has no worksheet to read from
    #[error("Spreadsheet has no worksheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    /// Spreadsheet could not be written
    #[error("Failed to write spreadsheet {}: {source}", path.display())]
    SheetWrite {
        /// Spreadsheet path
        path: PathBuf,
        /// Underlying writer error
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Built-in template failed to compile
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// File system error
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Explicit configuration file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Timestamp base could not be parsed
    #[error("Invalid timestamp '{0}', expected YYYY_MM_DD_HHMMSS")]
    InvalidTimestamp(String),
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Library result type
pub type Result<T> = std::result::Result<T, ScaffoldError>;
