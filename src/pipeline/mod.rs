//! The upload-processing pipeline.
//!
//! [`Processor`] is the exposed surface: `validate` gates an upload before
//! it is persisted, and `process` normalizes a stored file into a
//! [`ProcessedDataset`]. Only two conditions abort processing with an error
//! ([`ProcessError::UnsupportedFormat`] and [`ProcessError::SourceNotFound`]);
//! every failure past the dispatcher is captured in the returned dataset.

pub mod capping;
pub mod hashing;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::config::{ProcessingLimits, UploadLimits};
use crate::error::{ParseError, ProcessError};
use crate::observability::{ProcessStats, StepContext, StepObserver, StepSeverity};
use crate::parsers::{parser_for, ParseOptions};
use crate::storage::ByteStore;
use crate::types::{FileType, ProcessedDataset, Table, UploadRequest};
use crate::validation::validate_upload;

pub use capping::{apply_caps, CapOutcome};
pub use hashing::fingerprint_rows;

/// The upload ingestion/normalization pipeline.
///
/// One `Processor` serves many invocations; each call operates on its own
/// request and produces its own result, with no shared mutable state.
pub struct Processor {
    store: Arc<dyn ByteStore>,
    upload_limits: UploadLimits,
    processing_limits: ProcessingLimits,
    observer: Option<Arc<dyn StepObserver>>,
    alert_at_or_above: StepSeverity,
}

impl Processor {
    /// Create a processor over a byte store with the given limits.
    pub fn new(
        store: Arc<dyn ByteStore>,
        upload_limits: UploadLimits,
        processing_limits: ProcessingLimits,
    ) -> Self {
        Self {
            store,
            upload_limits,
            processing_limits,
            observer: None,
            alert_at_or_above: StepSeverity::Critical,
        }
    }

    /// Attach an observer for progress/timing/failure reporting.
    pub fn with_observer(mut self, observer: Arc<dyn StepObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Severity at or above which `on_alert` fires (default: `Critical`).
    pub fn with_alert_threshold(mut self, severity: StepSeverity) -> Self {
        self.alert_at_or_above = severity;
        self
    }

    /// Validate an upload before it is persisted.
    ///
    /// Returns `false` to reject; never errors. Always accepts when
    /// validation is disabled in the processing limits.
    pub fn validate(&self, request: &UploadRequest) -> bool {
        if !self.processing_limits.validation_enabled {
            return true;
        }
        validate_upload(request, &self.upload_limits)
    }

    /// Process a stored file into a normalized dataset.
    ///
    /// `path` must have been confirmed to exist via the store (typically by
    /// the orchestration layer after `save`); `extension` selects the
    /// parser. See [`Processor::process_with_cancel`] for cancellation.
    pub async fn process(
        &self,
        path: &Path,
        extension: &str,
    ) -> Result<ProcessedDataset, ProcessError> {
        self.process_with_cancel(path, extension, CancellationToken::new())
            .await
    }

    /// Like [`Processor::process`], with a caller-supplied cancellation
    /// token. Cancellation and the configured processing-time budget both
    /// surface as a captured failure, not as `Err`.
    pub async fn process_with_cancel(
        &self,
        path: &Path,
        extension: &str,
        cancel: CancellationToken,
    ) -> Result<ProcessedDataset, ProcessError> {
        let file_type =
            FileType::from_extension(extension).ok_or_else(|| ProcessError::UnsupportedFormat {
                extension: extension.to_string(),
            })?;
        let ctx = StepContext {
            path: path.to_path_buf(),
            file_type,
        };

        if !self.store.exists(path).await {
            let err = ProcessError::SourceNotFound {
                path: path.to_path_buf(),
            };
            self.report_failure(&ctx, StepSeverity::Critical, &err);
            return Err(err);
        }

        let started = Instant::now();
        let bytes = match self.store.open(path).await {
            Ok(bytes) => bytes,
            Err(e) => return Ok(self.capture_failure(&ctx, ParseError::from(e))),
        };
        self.report_step(&ctx, "read", started.elapsed());
        let source_size = bytes.len() as u64;

        let started = Instant::now();
        let table = match self.run_parser(file_type, bytes, &cancel).await {
            Ok(table) => table,
            Err(e) => return Ok(self.capture_failure(&ctx, e)),
        };
        self.report_step(&ctx, "parse", started.elapsed());

        let started = Instant::now();
        let CapOutcome {
            table,
            use_separate_table,
        } = apply_caps(table, source_size, &self.processing_limits);
        self.report_step(&ctx, "cap", started.elapsed());

        let started = Instant::now();
        let data_hash = fingerprint_rows(&table.rows);
        self.report_step(&ctx, "hash", started.elapsed());

        let preview_len = table.row_count().min(self.processing_limits.max_preview_rows);
        let preview_data = table.rows[..preview_len].to_vec();

        let processed_data = if use_separate_table {
            None
        } else {
            match serde_json::to_string(&table.rows) {
                Ok(json) => Some(json),
                Err(e) => return Ok(self.capture_failure(&ctx, ParseError::from(e))),
            }
        };

        let dataset = ProcessedDataset {
            is_processed: true,
            file_type,
            row_count: table.row_count(),
            column_count: table.schema.len(),
            preview_data,
            processed_data,
            use_separate_table,
            data_hash: Some(data_hash),
            processing_errors: None,
            schema: table.schema,
        };

        if let Some(obs) = self.observer.as_ref() {
            obs.on_success(
                &ctx,
                ProcessStats {
                    rows: dataset.row_count,
                    columns: dataset.column_count,
                    truncated: dataset.use_separate_table,
                },
            );
        }
        Ok(dataset)
    }

    /// Run the matched parser off the async runtime, bounded by the
    /// processing-time budget and the caller's cancellation token.
    async fn run_parser(
        &self,
        file_type: FileType,
        bytes: Vec<u8>,
        cancel: &CancellationToken,
    ) -> Result<Table, ParseError> {
        if cancel.is_cancelled() {
            return Err(ParseError::Cancelled);
        }

        let budget = self.processing_limits.max_processing_time;
        let options = ParseOptions {
            infer_types: self.processing_limits.schema_inference_enabled,
            cancel: cancel.child_token(),
        };
        let token = options.cancel.clone();

        let handle =
            tokio::task::spawn_blocking(move || parser_for(file_type).parse(&bytes, &options));

        match tokio::time::timeout(budget, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ParseError::Malformed {
                message: format!("parser task failed: {join_error}"),
            }),
            Err(_elapsed) => {
                // Let the blocking parse notice and unwind on its own.
                token.cancel();
                Err(ParseError::TimedOut {
                    seconds: budget.as_secs(),
                })
            }
        }
    }

    fn capture_failure(&self, ctx: &StepContext, error: ParseError) -> ProcessedDataset {
        self.report_failure(ctx, severity_for(&error), &error);
        ProcessedDataset::failed(ctx.file_type, error.to_string())
    }

    fn report_step(&self, ctx: &StepContext, step: &str, elapsed: std::time::Duration) {
        if let Some(obs) = self.observer.as_ref() {
            obs.on_step(ctx, step, elapsed);
        }
    }

    fn report_failure(
        &self,
        ctx: &StepContext,
        severity: StepSeverity,
        error: &dyn std::error::Error,
    ) {
        if let Some(obs) = self.observer.as_ref() {
            obs.on_failure(ctx, severity, error);
            if severity >= self.alert_at_or_above {
                obs.on_alert(ctx, severity, error);
            }
        }
    }
}

fn severity_for(error: &ParseError) -> StepSeverity {
    match error {
        ParseError::Io(_) => StepSeverity::Critical,
        ParseError::TimedOut { .. } | ParseError::Cancelled => StepSeverity::Warning,
        _ => StepSeverity::Error,
    }
}
