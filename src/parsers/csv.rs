//! CSV/TSV parsing.
//!
//! The first line is the header row and defines the ordered schema; each
//! subsequent record becomes one row keyed by those headers positionally.
//! Trailing blank lines are ignored; a header-only file yields zero rows.

use crate::error::ParseResult;
use crate::types::{Row, Schema, Table};

use super::{scalar_from_text, ParseOptions, Parser};

/// Parser for comma- and tab-separated values.
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, bytes: &[u8], options: &ParseOptions) -> ParseResult<Table> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(sniff_delimiter(bytes))
            .from_reader(bytes);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
        let schema = Schema::new(headers.iter().cloned());

        let mut rows: Vec<Row> = Vec::new();
        for result in rdr.records() {
            options.check_cancelled()?;
            let record = result?;

            let mut row = Row::with_capacity(headers.len());
            for (i, header) in headers.iter().enumerate() {
                let raw = record.get(i).unwrap_or("");
                row.insert(header.clone(), scalar_from_text(raw, options.infer_types));
            }
            rows.push(row);
        }

        Ok(Table::new(schema, rows))
    }
}

/// Pick tab as the delimiter when the header line is tab-separated.
///
/// `.tsv` and `.csv` share one parser; the extension is not visible here,
/// so the header line decides.
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or(&[]);
    let tabs = first_line.iter().filter(|b| **b == b'\t').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    if tabs > commas { b'\t' } else { b',' }
}
