use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures that can occur while the tool loads the
/// source spreadsheets or writes the derived artifacts.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Raised when an input spreadsheet does not exist.
    #[error("source file not found: {0}")]
    SourceNotFound(PathBuf),

    /// Raised when the worksheet holds a header but no data rows.
    #[error("source has no data rows: {0}")]
    EmptySource(PathBuf),

    /// Raised when the expected worksheet is absent or unreadable.
    #[error("malformed source {path}: {reason}")]
    MalformedSource { path: PathBuf, reason: String },

    /// Raised when an export destination cannot be created or written.
    #[error("failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Wrapper for IO failures such as reading configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization of layouts or summaries fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the settings file is unreadable or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ToolError {
    pub(crate) fn write_failure(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ToolError::WriteFailure {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

impl From<toml::de::Error> for ToolError {
    fn from(error: toml::de::Error) -> Self {
        ToolError::Config(error.to_string())
    }
}
