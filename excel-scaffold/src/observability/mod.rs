//! Observability (logging)
//!
//! Diagnostics go to stderr through `tracing`, so generated output and the
//! CLI's own progress lines on stdout stay clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Map a `-v` count to a default filter directive
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,excel_scaffold=debug",
        _ => "debug,excel_scaffold=trace",
    }
}

/// Initialize logging
///
/// `RUST_LOG` takes precedence over `verbosity`.
///
/// # Example
///
/// ```rust,no_run
/// use excel_scaffold::observability::{self, LogFormat};
///
/// # fn main() -> excel_scaffold::Result<()> {
/// observability::init(1, LogFormat::Pretty);
/// tracing::info!("generator started");
/// # Ok(())
/// # }
/// ```
pub fn init(verbosity: u8, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let registry = tracing_subscriber::registry().with(env_filter);

    // A subscriber may already be installed (tests, embedding); keep it.
    let installed = match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
