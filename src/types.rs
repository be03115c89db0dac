//! Core data model types for upload ingestion.
//!
//! Every parser converges on the same shape: a [`Table`] of [`Row`]s described
//! by an insertion-ordered [`Schema`]. The pipeline then caps, previews, and
//! fingerprints the table into a [`ProcessedDataset`].

use indexmap::IndexMap;
use serde::Serialize;

/// A single cell value in a normalized row.
///
/// JSON and XML rows may carry substructure; it is kept opaque in
/// [`Value::Nested`] rather than flattened into dotted column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// UTF-8 string.
    Text(String),
    /// Opaque nested structure (JSON object/array).
    Nested(serde_json::Value),
}

/// One normalized row: an ordered mapping from column name to [`Value`].
///
/// Rows within one dataset need not share identical key sets (JSON/XML may
/// vary); the column union across rows defines the schema.
pub type Row = IndexMap<String, Value>;

/// Ordered, de-duplicated list of column names (first-seen order).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Create a schema from an ordered column list, dropping duplicates
    /// (first occurrence wins).
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut schema = Self::default();
        for c in columns {
            schema.observe(c.into());
        }
        schema
    }

    /// Build a schema as the first-seen union of row keys.
    pub fn union_of_rows<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Self {
        let mut schema = Self::default();
        for row in rows {
            for key in row.keys() {
                schema.observe(key.clone());
            }
        }
        schema
    }

    /// Record a column name if it has not been seen yet.
    pub fn observe(&mut self, column: String) {
        if !self.columns.iter().any(|c| *c == column) {
            self.columns.push(column);
        }
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True if `column` is part of the schema.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Keep only the first `max` columns (earliest-declared win).
    pub fn truncate(&mut self, max: usize) {
        self.columns.truncate(max);
    }
}

/// Uniform parser output: an ordered row sequence plus its schema.
///
/// Formats with explicit headers (CSV/Excel/Text) declare the schema up
/// front, so a header-only file still carries its column list at
/// `row_count() == 0`. JSON/XML derive it as the union of row keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Schema describing the row shape.
    pub schema: Schema,
    /// Normalized rows in input order.
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileType {
    /// Comma- or tab-separated values.
    Csv,
    /// JSON array-of-objects or a single object.
    Json,
    /// Spreadsheet/workbook formats.
    Excel,
    /// XML with repeating row elements under the root.
    Xml,
    /// Plain text, one row per line.
    Txt,
}

impl FileType {
    /// Map a file extension (case-insensitive) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" | "tsv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xlsx" | "xls" | "xlsm" | "ods" => Some(Self::Excel),
            "xml" => Some(Self::Xml),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }
}

/// One upload, owned by the caller for the duration of a pipeline invocation.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Client-declared file name, including extension.
    pub file_name: String,
    /// Client-declared size in bytes.
    pub declared_size: u64,
    /// Raw file content.
    pub content: Vec<u8>,
    /// Optional content-type hint; informational only.
    pub content_type: Option<String>,
}

impl UploadRequest {
    /// Create a request from a file name and content, deriving the declared
    /// size from the content length.
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            declared_size: content.len() as u64,
            content,
            content_type: None,
        }
    }
}

/// The pipeline's immutable output for one upload.
///
/// Exactly one of `is_processed == true` / `processing_errors != None` holds.
/// For processed datasets, `processed_data == None` iff `use_separate_table`,
/// and `preview_data.len() == min(row_count, max_preview_rows)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedDataset {
    /// True only if parsing completed (even if rows/columns were capped).
    pub is_processed: bool,
    /// Detected format.
    pub file_type: FileType,
    /// Post-capping row count.
    pub row_count: usize,
    /// Post-capping column count.
    pub column_count: usize,
    /// Final column list; empty when parsing failed.
    pub schema: Schema,
    /// Bounded row sample; empty when parsing failed.
    pub preview_data: Vec<Row>,
    /// Full normalized rows as JSON; `None` when stored out-of-line.
    pub processed_data: Option<String>,
    /// True when the source exceeded the inline-storage thresholds.
    pub use_separate_table: bool,
    /// Hex SHA-256 fingerprint of the canonicalized, capped rows.
    pub data_hash: Option<String>,
    /// Diagnostic message; set exactly when `is_processed` is false.
    pub processing_errors: Option<String>,
}

impl ProcessedDataset {
    /// A failed result: parsing did not complete, all data fields default.
    pub fn failed(file_type: FileType, message: impl Into<String>) -> Self {
        Self {
            is_processed: false,
            file_type,
            row_count: 0,
            column_count: 0,
            schema: Schema::default(),
            preview_data: Vec::new(),
            processed_data: None,
            use_separate_table: false,
            data_hash: None,
            processing_errors: Some(message.into()),
        }
    }
}
