use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while installing the process-wide telemetry pipeline.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("error opening log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("span exporter initialization failed: {0}")]
    Exporter(String),

    #[error("log bridge already installed: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),

    #[error("global subscriber already installed: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// A type alias for `Result` with `TelemetryError`.
pub type Result<T> = std::result::Result<T, TelemetryError>;
