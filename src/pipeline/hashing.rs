//! Canonical content fingerprinting.
//!
//! The hash is a pure function of the normalized, capped row content: rows
//! in their final order, each row's keys sorted lexicographically, values in
//! canonical JSON text. Incidental artifacts stripped during normalization
//! (original key order, source whitespace) cannot influence the digest.
//! Nested values are hashed as their serialized JSON with original key
//! order; only top-level row keys are sorted.

use sha2::{Digest, Sha256};

use crate::types::{Row, Value};

// Unambiguous separators so ("ab", "c") and ("a", "bc") hash differently.
const FIELD_SEP: u8 = 0x1f;
const ROW_SEP: u8 = 0x1e;

/// Compute the hex SHA-256 fingerprint of a final row sequence.
pub fn fingerprint_rows(rows: &[Row]) -> String {
    let mut hasher = Sha256::new();
    for row in rows {
        let mut keys: Vec<&String> = row.keys().collect();
        keys.sort_unstable();
        for key in keys {
            hasher.update(key.as_bytes());
            hasher.update([FIELD_SEP]);
            hasher.update(canonical_value(&row[key.as_str()]).as_bytes());
            hasher.update([FIELD_SEP]);
        }
        hasher.update([ROW_SEP]);
    }
    hex::encode(hasher.finalize())
}

/// Fixed textual form of a value: its canonical JSON serialization.
fn canonical_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
