//! Row/column capping and the inline vs. separate-table storage decision.

use crate::config::ProcessingLimits;
use crate::types::Table;

/// A table after capping, plus the storage-mode decision.
#[derive(Debug, Clone, PartialEq)]
pub struct CapOutcome {
    /// The capped table.
    pub table: Table,
    /// True when the source row count or byte size exceeded the inline
    /// thresholds; the full payload then belongs out-of-line.
    pub use_separate_table: bool,
}

/// Enforce the configured row/column ceilings on a parsed table.
///
/// Rows beyond `max_rows_per_dataset` are dropped silently. Columns beyond
/// `max_columns_per_dataset` are dropped from the schema and from every row,
/// keeping the earliest-declared columns. The storage decision reflects the
/// *pre-cap* row count and the source byte size.
pub fn apply_caps(mut table: Table, source_size: u64, limits: &ProcessingLimits) -> CapOutcome {
    if table.schema.len() > limits.max_columns_per_dataset {
        table.schema.truncate(limits.max_columns_per_dataset);
        let kept = table.schema.clone();
        for row in &mut table.rows {
            row.retain(|column, _| kept.contains(column));
        }
    }

    let source_rows = table.row_count();
    let use_separate_table =
        source_rows > limits.max_rows_per_dataset || source_size > limits.max_inline_bytes;
    if source_rows > limits.max_rows_per_dataset {
        table.rows.truncate(limits.max_rows_per_dataset);
    }

    CapOutcome {
        table,
        use_separate_table,
    }
}
