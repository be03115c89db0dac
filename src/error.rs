use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for parser-level operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Failure modes that are *captured* into a
/// [`crate::types::ProcessedDataset`] instead of being returned to the
/// caller.
///
/// Once the dispatcher has matched a parser and the source file exists,
/// nothing in the pipeline propagates an error: malformed content, I/O
/// failures mid-read, timeouts, and cancellation all degrade to a result
/// with `is_processed == false`.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Underlying I/O error while reading the source bytes.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV content (ragged row, bad quoting, invalid UTF-8).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON content.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Corrupt or unreadable spreadsheet bytes.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Malformed XML content.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Structurally valid input that does not fit the expected row shape
    /// (e.g. a top-level JSON number, a workbook with no sheets).
    #[error("malformed input: {message}")]
    Malformed { message: String },

    /// The caller's processing-time budget elapsed before parsing finished.
    #[error("processing timed out after {seconds}s")]
    TimedOut { seconds: u64 },

    /// The caller's cancellation token fired during row materialization.
    #[error("processing was cancelled")]
    Cancelled,
}

impl ParseError {
    /// Shorthand for [`ParseError::Malformed`].
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// The only two conditions allowed to abort the pipeline outright.
///
/// Both indicate a caller/config mismatch rather than bad user data, so they
/// are returned as `Err` from [`crate::pipeline::Processor::process`] instead
/// of being captured in the result.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The extension has no registered parser.
    #[error("unsupported format: no parser registered for extension '{extension}'")]
    UnsupportedFormat { extension: String },

    /// The source path does not exist in the byte store at process time.
    #[error("source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },
}
