// src/table/duplicates.rs

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use super::{Table, Value};
use crate::TransferError;

/// Hashable view of a [`Value`]. Numbers compare by bit pattern, with all
/// zeros and all NaNs folded together.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Empty,
    Text(&'a str),
    Number(u64),
    Date(NaiveDate),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(v: &'a Value) -> Self {
        match v {
            Value::Empty => CellKey::Empty,
            Value::Text(s) => CellKey::Text(s),
            Value::Number(n) if *n == 0.0 => CellKey::Number(0f64.to_bits()),
            Value::Number(n) if n.is_nan() => CellKey::Number(f64::NAN.to_bits()),
            Value::Number(n) => CellKey::Number(n.to_bits()),
            Value::Date(d) => CellKey::Date(*d),
        }
    }
}

/// Positions of every row whose value in `column` occurs more than once.
///
/// All occurrences are returned, not just the repeats, in ascending order.
/// Matching is exact: `"1"` and `1.0` are different values.
pub fn find_duplicates(table: &Table, column: &str) -> Result<Vec<usize>, TransferError> {
    let col = table.require_column(column)?;

    let mut seen: HashMap<CellKey<'_>, usize> = HashMap::new();
    for v in table.column_values(col) {
        *seen.entry(CellKey::from(v)).or_default() += 1;
    }

    let dupes: Vec<usize> = table
        .column_values(col)
        .enumerate()
        .filter(|(_, v)| seen.get(&CellKey::from(*v)).copied().unwrap_or(0) > 1)
        .map(|(i, _)| i)
        .collect();

    debug!(column, rows = dupes.len(), "duplicate scan");
    Ok(dupes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[Value]) -> Table {
        Table::from_rows(["cpf"], values.iter().map(|v| vec![v.clone()]))
    }

    #[test]
    fn distinct_values_yield_nothing() {
        let t = column(&[Value::text("a"), Value::text("b"), Value::text("c")]);
        assert!(find_duplicates(&t, "cpf").unwrap().is_empty());
    }

    #[test]
    fn all_occurrences_flagged() {
        let t = column(&[
            Value::text("a"),
            Value::text("b"),
            Value::text("a"),
            Value::text("c"),
            Value::text("b"),
        ]);
        assert_eq!(find_duplicates(&t, "cpf").unwrap(), vec![0, 1, 2, 4]);
    }

    #[test]
    fn exact_match_only() {
        let t = column(&[
            Value::text("1"),
            Value::Number(1.0),
            Value::text("a"),
            Value::text("A"),
            Value::text(" a"),
        ]);
        assert!(find_duplicates(&t, "cpf").unwrap().is_empty());

        let t = column(&[Value::Number(5.0), Value::text("x"), Value::Number(5.0)]);
        assert_eq!(find_duplicates(&t, "CPF").unwrap(), vec![0, 2]);
    }

    #[test]
    fn empty_table_and_missing_column() {
        let t = column(&[]);
        assert!(find_duplicates(&t, "cpf").unwrap().is_empty());
        assert_eq!(
            find_duplicates(&t, "pis"),
            Err(TransferError::MissingColumn("pis".into()))
        );
    }
}
