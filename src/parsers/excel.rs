//! Excel/workbook parsing.
//!
//! Reads the first worksheet only. The first row is the header row; each
//! subsequent row contributes one cell per header column, typed per its
//! native spreadsheet type (numeric vs. text) before entering the row map.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{ParseError, ParseResult};
use crate::types::{Row, Schema, Table, Value};

use super::{ParseOptions, Parser};

/// Parser for spreadsheet uploads.
pub struct ExcelParser;

impl Parser for ExcelParser {
    fn parse(&self, bytes: &[u8], options: &ParseOptions) -> ParseResult<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ParseError::malformed("workbook has no sheets"))?;
        let range = workbook.worksheet_range(&sheet)?;

        let mut row_iter = range.rows();
        let Some(header_row) = row_iter.next() else {
            return Ok(Table::new(Schema::default(), Vec::new()));
        };
        let headers: Vec<String> = header_row.iter().map(cell_to_header_string).collect();
        let schema = Schema::new(headers.iter().cloned());

        let mut rows: Vec<Row> = Vec::new();
        for cells in row_iter {
            options.check_cancelled()?;

            let mut row = Row::with_capacity(headers.len());
            for (i, header) in headers.iter().enumerate() {
                let cell = cells.get(i).unwrap_or(&Data::Empty);
                row.insert(header.clone(), convert_cell(cell));
            }
            rows.push(row);
        }

        Ok(Table::new(schema, rows))
    }
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => "".to_string(),
    }
}

fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(f) => Value::Text(f.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(format!("{e:?}")),
    }
}
