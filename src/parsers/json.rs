//! JSON parsing.
//!
//! Accepts a top-level array of objects (each object = one row) or a single
//! top-level object (exactly one row). The schema is the first-seen union of
//! keys across rows; values retain their JSON type, with objects/arrays kept
//! as opaque nested values.

use crate::error::{ParseError, ParseResult};
use crate::types::{Row, Schema, Table, Value};

use super::{ParseOptions, Parser};

/// Parser for JSON uploads.
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, bytes: &[u8], options: &ParseOptions) -> ParseResult<Table> {
        let root: serde_json::Value = serde_json::from_slice(bytes)?;

        let objects = match root {
            serde_json::Value::Array(items) => items,
            obj @ serde_json::Value::Object(_) => vec![obj],
            _ => {
                return Err(ParseError::malformed(
                    "json must be an object or an array of objects",
                ));
            }
        };

        let mut rows: Vec<Row> = Vec::with_capacity(objects.len());
        for (idx0, item) in objects.into_iter().enumerate() {
            options.check_cancelled()?;
            let serde_json::Value::Object(map) = item else {
                return Err(ParseError::malformed(format!(
                    "array element {} is not a json object",
                    idx0 + 1
                )));
            };

            let mut row = Row::with_capacity(map.len());
            for (key, value) in map {
                row.insert(key, convert_json_value(value));
            }
            rows.push(row);
        }

        let schema = Schema::union_of_rows(&rows);
        Ok(Table::new(schema, rows))
    }
}

fn convert_json_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(s) => Value::Text(s),
        nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
            Value::Nested(nested)
        }
    }
}
