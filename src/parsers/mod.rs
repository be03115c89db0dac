//! Format parsers and the fixed dispatch table.
//!
//! Each parser converts raw bytes into a [`Table`] (ordered rows plus
//! schema). Selection happens by [`FileType`]; there is no runtime content
//! sniffing. Parsers check the cancellation token inside their
//! row-materialization loops so a timed-out or cancelled invocation stops
//! promptly.

pub mod csv;
pub mod excel;
pub mod json;
pub mod text;
pub mod xml;

use tokio_util::sync::CancellationToken;

use crate::error::{ParseError, ParseResult};
use crate::types::{FileType, Table, Value};
use crate::validation::is_numeric_string;

/// Options threaded into every parser invocation.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Infer int/float/bool from textual cells (CSV/XML) instead of keeping
    /// everything as text.
    pub infer_types: bool,
    /// Cooperative cancellation signal.
    pub cancel: CancellationToken,
}

impl ParseOptions {
    /// Bail out of a row loop if cancellation was requested.
    pub(crate) fn check_cancelled(&self) -> ParseResult<()> {
        if self.cancel.is_cancelled() {
            Err(ParseError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Capability interface shared by all format parsers.
pub trait Parser: Send + Sync {
    /// Parse raw bytes into an ordered row sequence with its schema.
    fn parse(&self, bytes: &[u8], options: &ParseOptions) -> ParseResult<Table>;
}

/// Look up the parser for a format in the fixed dispatch table.
pub fn parser_for(file_type: FileType) -> &'static dyn Parser {
    match file_type {
        FileType::Csv => &csv::CsvParser,
        FileType::Json => &json::JsonParser,
        FileType::Excel => &excel::ExcelParser,
        FileType::Xml => &xml::XmlParser,
        FileType::Txt => &text::TextParser,
    }
}

/// Convert a textual cell into a typed [`Value`] using basic inference.
///
/// Empty text maps to null. With inference enabled, integers, floats, and
/// booleans are recognized; everything else stays text.
pub(crate) fn scalar_from_text(raw: &str, infer_types: bool) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if !infer_types {
        return Value::Text(raw.to_string());
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }
    if is_numeric_string(trimmed) {
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::Float(f);
        }
    }
    match trimmed {
        "true" | "True" | "TRUE" => Value::Bool(true),
        "false" | "False" | "FALSE" => Value::Bool(false),
        _ => Value::Text(raw.to_string()),
    }
}
