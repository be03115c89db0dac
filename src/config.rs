//! Immutable configuration for the upload pipeline.
//!
//! Loading (files/env) is the caller's concern; the pipeline only reads
//! these structs.

use std::time::Duration;

/// Limits applied at upload time, before any parsing.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    /// Maximum declared file size, in bytes.
    pub max_file_size: u64,
    /// Extensions (without dot, lowercase) accepted for upload.
    pub allowed_extensions: Vec<String>,
    /// Extensions rejected even if present in the allow-list.
    pub blocked_extensions: Vec<String>,
    /// Maximum number of rows in a dataset preview.
    pub max_preview_rows: usize,
    /// Upper bound on concurrently processed uploads (enforced by the
    /// caller, e.g. via [`crate::limiter::ConcurrencyGate`]).
    pub max_concurrent_uploads: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            allowed_extensions: [
                "csv", "tsv", "json", "xlsx", "xls", "xlsm", "ods", "xml", "txt",
            ]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            blocked_extensions: Vec::new(),
            max_preview_rows: 10,
            max_concurrent_uploads: 4,
        }
    }
}

/// Limits applied while normalizing parsed rows.
#[derive(Debug, Clone)]
pub struct ProcessingLimits {
    /// Row ceiling; rows beyond it are dropped, not an error.
    pub max_rows_per_dataset: usize,
    /// Column ceiling; earliest-declared columns are kept.
    pub max_columns_per_dataset: usize,
    /// Maximum number of rows in a dataset preview.
    pub max_preview_rows: usize,
    /// Processing-time budget for one invocation.
    pub max_processing_time: Duration,
    /// Source-size threshold above which the full row payload is stored
    /// out-of-line (`use_separate_table`).
    pub max_inline_bytes: u64,
    /// When false, CSV/XML cell values are kept as text instead of being
    /// inferred into int/float/bool.
    pub schema_inference_enabled: bool,
    /// When false, [`crate::pipeline::Processor::validate`] accepts every
    /// request.
    pub validation_enabled: bool,
}

impl Default for ProcessingLimits {
    fn default() -> Self {
        Self {
            max_rows_per_dataset: 10_000,
            max_columns_per_dataset: 100,
            max_preview_rows: 10,
            max_processing_time: Duration::from_secs(30),
            max_inline_bytes: 1024 * 1024,
            schema_inference_enabled: true,
            validation_enabled: true,
        }
    }
}
