//! `tabular-ingest` normalizes user-uploaded files in heterogeneous formats
//! (CSV, JSON, Excel, XML, plain text) into one tabular representation with
//! an inferred schema, a bounded preview, a deterministic content
//! fingerprint, and an inline vs. out-of-line storage decision.
//!
//! The primary entrypoint is [`pipeline::Processor`]: call
//! [`pipeline::Processor::validate`] before persisting an upload, then
//! [`pipeline::Processor::process`] on the stored path. Parsing failures are
//! captured in the returned [`types::ProcessedDataset`]
//! (`is_processed == false`, `processing_errors` set); only an unsupported
//! extension or a missing source path return an error.
//!
//! ## What you can ingest
//!
//! **File formats (selected by extension, case-insensitive):**
//!
//! - **CSV/TSV**: `.csv`, `.tsv` — first line is the header row
//! - **JSON**: `.json` — array-of-objects, or a single object as one row
//! - **Excel/workbooks**: `.xlsx`, `.xls`, `.xlsm`, `.ods` — first sheet only
//! - **XML**: `.xml` — repeating children of the root element are rows
//! - **Text**: `.txt` — one row per line (`LineNumber`, `Content`)
//!
//! Rows are ordered maps of typed [`types::Value`]s; nested JSON/XML content
//! stays opaque rather than being flattened into dotted columns.
//!
//! ## Quick example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use tabular_ingest::config::{ProcessingLimits, UploadLimits};
//! use tabular_ingest::pipeline::Processor;
//! use tabular_ingest::storage::FsStore;
//! use tabular_ingest::types::UploadRequest;
//!
//! # async fn run() -> Result<(), tabular_ingest::ProcessError> {
//! let store = Arc::new(FsStore::new("uploads"));
//! let processor = Processor::new(
//!     store,
//!     UploadLimits::default(),
//!     ProcessingLimits::default(),
//! );
//!
//! let request = UploadRequest::new("sales.csv", b"Name,Age\nJohn,30\n".to_vec());
//! assert!(processor.validate(&request));
//!
//! // The orchestration layer saves the file, then processes the stored path.
//! let dataset = processor.process(Path::new("sales.csv"), "csv").await?;
//! println!("rows={} hash={:?}", dataset.row_count, dataset.data_hash);
//! # Ok(())
//! # }
//! ```
//!
//! ## Observability
//!
//! Attach a [`observability::StepObserver`] to receive per-step timing,
//! success stats, and severity-classified failures:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tabular_ingest::config::{ProcessingLimits, UploadLimits};
//! use tabular_ingest::observability::{StdErrObserver, StepSeverity};
//! use tabular_ingest::pipeline::Processor;
//! use tabular_ingest::storage::FsStore;
//!
//! let processor = Processor::new(
//!     Arc::new(FsStore::new("uploads")),
//!     UploadLimits::default(),
//!     ProcessingLimits::default(),
//! )
//! .with_observer(Arc::new(StdErrObserver))
//! .with_alert_threshold(StepSeverity::Critical);
//! ```
//!
//! ## Modules
//!
//! - [`pipeline`]: the processor (validate/process), capping, hashing
//! - [`parsers`]: the five format parsers behind one dispatch table
//! - [`types`]: rows, schema, formats, the processed-dataset result
//! - [`config`]: immutable upload/processing limits
//! - [`validation`]: the upload validation gate and its pure predicates
//! - [`storage`]: the async byte-store seam and a filesystem implementation
//! - [`observability`]: observer hooks (composite, stderr, file sinks)
//! - [`limiter`]: caller-side concurrency gate for uploads
//! - [`error`]: captured vs. thrown error types

pub mod config;
pub mod error;
pub mod limiter;
pub mod observability;
pub mod parsers;
pub mod pipeline;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::{ParseError, ParseResult, ProcessError};
pub use pipeline::Processor;
pub use types::{FileType, ProcessedDataset, Row, Schema, Table, UploadRequest, Value};
