//! XML parsing.
//!
//! Repeating direct children of the root element are treated as rows; each
//! row's immediate child elements become columns keyed by element name, with
//! the element's (concatenated) text content as the value. The column set is
//! the first-seen union across rows.

use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;

use crate::error::ParseResult;
use crate::types::{Row, Schema, Table, Value};

use super::{scalar_from_text, ParseOptions, Parser};

/// Parser for XML uploads.
pub struct XmlParser;

impl Parser for XmlParser {
    fn parse(&self, bytes: &[u8], options: &ParseOptions) -> ParseResult<Table> {
        let mut reader = XmlReader::from_reader(bytes);
        reader.trim_text(true);

        let mut rows: Vec<Row> = Vec::new();
        let mut current_row: Option<Row> = None;
        let mut current_column: Option<String> = None;
        let mut text = String::new();
        // Number of currently open elements: 1 = root, 2 = row, 3 = column.
        let mut depth = 0usize;

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    depth += 1;
                    match depth {
                        1 => {}
                        2 => {
                            options.check_cancelled()?;
                            current_row = Some(Row::new());
                        }
                        3 => {
                            current_column = Some(element_name(e.name().as_ref()));
                            text.clear();
                        }
                        // Elements nested inside a column contribute only
                        // their text content, kept flat.
                        _ => {}
                    }
                }
                Event::Empty(e) => match depth + 1 {
                    2 => {
                        options.check_cancelled()?;
                        rows.push(Row::new());
                    }
                    3 => {
                        if let Some(row) = current_row.as_mut() {
                            row.insert(element_name(e.name().as_ref()), Value::Null);
                        }
                    }
                    _ => {}
                },
                Event::Text(t) => {
                    if depth >= 3 && current_column.is_some() {
                        if !text.is_empty() {
                            text.push(' ');
                        }
                        text.push_str(&t.unescape()?);
                    }
                }
                // CDATA is element text content, just not subject to escaping.
                Event::CData(t) => {
                    if depth >= 3 && current_column.is_some() {
                        if !text.is_empty() {
                            text.push(' ');
                        }
                        text.push_str(&String::from_utf8_lossy(t.as_ref()));
                    }
                }
                Event::End(_) => {
                    if depth == 3 {
                        if let (Some(row), Some(column)) =
                            (current_row.as_mut(), current_column.take())
                        {
                            row.insert(column, scalar_from_text(&text, options.infer_types));
                        }
                        text.clear();
                    } else if depth == 2 {
                        if let Some(row) = current_row.take() {
                            rows.push(row);
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let schema = Schema::union_of_rows(&rows);
        Ok(Table::new(schema, rows))
    }
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
