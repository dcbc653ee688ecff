use crate::error::ReportError;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown tables
    Table,
    /// A single JSON document
    Json,
}

/// Settings fixed at start-up for the whole session.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Locale for collation, number and date formatting (e.g. `es-CO`).
    pub locale: String,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub output: OutputFormat,
}

/// Install the global `tracing` subscriber. Logs go to stderr so they never
/// mix with the report on stdout.
pub fn init_logging(config: &ViewConfig) -> Result<(), ReportError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ReportError::InvalidInput(format!("log filter: {e}")))?;
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ReportError::InvalidInput(format!("logging already initialized: {e}")))
}
