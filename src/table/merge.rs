// src/table/merge.rs

use tracing::{debug, warn};

use super::{Table, Value};

/// Copy every column shared by `source` and `target` into `target`.
///
/// Rows are matched by position only; there is no join key. The caller must
/// hand over tables whose rows line up one-to-one. A length mismatch is not
/// repaired: it is logged, target rows past the end of the source become
/// `Empty` and surplus source rows are ignored.
///
/// Target-only columns are untouched, source-only columns are dropped, and
/// the target's shape never changes.
pub fn merge(source: &Table, mut target: Table) -> Table {
    if source.len() != target.len() {
        warn!(
            source_rows = source.len(),
            target_rows = target.len(),
            "row counts differ; rows are aligned by position"
        );
    }

    let shared: Vec<(usize, usize)> = source
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(src_idx, name)| target.column_index(name).map(|dst| (src_idx, dst)))
        .collect();

    for &(src_col, dst_col) in &shared {
        debug!(column = %target.columns()[dst_col], "copying column");
        for row in 0..target.len() {
            let value = source.get(row, src_col).cloned().unwrap_or(Value::Empty);
            target.set(row, dst_col, value);
        }
    }

    target
}
