//! Plain-text parsing.
//!
//! Every input line becomes one row with exactly two columns: a 1-based
//! `LineNumber` and the line's `Content`. Invalid UTF-8 is replaced rather
//! than rejected.

use crate::error::ParseResult;
use crate::types::{Row, Schema, Table, Value};

use super::{ParseOptions, Parser};

/// Column name for the 1-based line number.
pub const LINE_NUMBER_COLUMN: &str = "LineNumber";
/// Column name for the line content.
pub const CONTENT_COLUMN: &str = "Content";

/// Parser for line-oriented text uploads.
pub struct TextParser;

impl Parser for TextParser {
    fn parse(&self, bytes: &[u8], options: &ParseOptions) -> ParseResult<Table> {
        let text = String::from_utf8_lossy(bytes);

        let mut rows: Vec<Row> = Vec::new();
        for (idx0, line) in text.lines().enumerate() {
            options.check_cancelled()?;
            let mut row = Row::with_capacity(2);
            row.insert(LINE_NUMBER_COLUMN.to_string(), Value::Int(idx0 as i64 + 1));
            row.insert(CONTENT_COLUMN.to_string(), Value::Text(line.to_string()));
            rows.push(row);
        }

        let schema = Schema::new([LINE_NUMBER_COLUMN, CONTENT_COLUMN]);
        Ok(Table::new(schema, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_line_becomes_a_numbered_row() {
        let table = TextParser
            .parse(b"alpha\nbeta\ngamma\n", &ParseOptions::default())
            .unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.schema.columns(), [LINE_NUMBER_COLUMN, CONTENT_COLUMN]);
        assert_eq!(table.rows[0][LINE_NUMBER_COLUMN], Value::Int(1));
        assert_eq!(table.rows[2][CONTENT_COLUMN], Value::Text("gamma".to_string()));
    }

    #[test]
    fn empty_input_yields_schema_but_no_rows() {
        let table = TextParser.parse(b"", &ParseOptions::default()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.schema.len(), 2);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let table = TextParser
            .parse(b"ok\n\xff\xfe\n", &ParseOptions::default())
            .unwrap();
        assert_eq!(table.row_count(), 2);
    }
}
