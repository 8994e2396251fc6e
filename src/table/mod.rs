// src/table/mod.rs

pub mod duplicates;
pub mod merge;

pub use duplicates::find_duplicates;
pub use merge::merge;

use chrono::NaiveDate;
use std::fmt;

use crate::{dates, TransferError};

/// A single cell, typed at the load boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Empty cell, or text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.trim().is_empty(),
            Value::Number(_) | Value::Date(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Text(s) => f.write_str(s),
            // integral numbers print without ".0" so numeric identifiers survive
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Value::Number(n) => write!(f, "{}", n),
            Value::Date(d) => f.write_str(&dates::format_date(*d)),
        }
    }
}

/// Trimmed, lower-cased column name used for every comparison.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One record; always as wide as its table's column list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<Value>,
}

impl Row {
    pub fn new(cells: Vec<Value>) -> Self {
        Self { cells }
    }

    pub fn get(&self, col: usize) -> Option<&Value> {
        self.cells.get(col)
    }

    pub fn cells(&self) -> &[Value] {
        &self.cells
    }
}

impl From<Vec<Value>> for Row {
    fn from(cells: Vec<Value>) -> Self {
        Row::new(cells)
    }
}

/// Ordered rows sharing one column list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build from string literals; handy for fixtures.
    pub fn from_rows<C, R>(columns: C, rows: R) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator<Item = Vec<Value>>,
    {
        let mut table = Table::new(columns.into_iter().map(Into::into).collect());
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rewrite every column name in its normalized form.
    pub fn normalize_columns(&mut self) {
        for c in self.columns.iter_mut() {
            *c = normalize_column_name(c);
        }
    }

    /// Position of `name`, compared after normalizing both sides.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_column_name(name);
        self.columns
            .iter()
            .position(|c| normalize_column_name(c) == wanted)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, TransferError> {
        self.column_index(name)
            .ok_or_else(|| TransferError::MissingColumn(normalize_column_name(name)))
    }

    /// Append a column of `Empty` cells; returns the existing index if present.
    pub fn add_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(normalize_column_name(name));
        for row in self.rows.iter_mut() {
            row.cells.push(Value::Empty);
        }
        self.columns.len() - 1
    }

    /// Push a row, padding with `Empty` or truncating to the table width.
    pub fn push_row(&mut self, cells: impl Into<Row>) {
        let mut row = cells.into();
        row.cells.resize(self.columns.len(), Value::Empty);
        self.rows.push(row);
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Overwrite a cell. Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: Value) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col)) {
            *cell = value;
        }
    }

    /// Values of one column, top to bottom.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |r| r.get(col).unwrap_or(&Value::Empty))
    }

    /// Keep rows for which `keep` is true; returns how many were dropped.
    pub fn retain_rows<F: FnMut(&Row) -> bool>(&mut self, keep: F) -> usize {
        let before = self.rows.len();
        self.rows.retain(keep);
        before - self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            [" Nome ", "CPF"],
            [
                vec![Value::text("Ana"), Value::Number(12345678909.0)],
                vec![Value::text("  "), Value::Empty],
                vec![Value::text("Bia")],
            ],
        )
    }

    #[test]
    fn rows_are_padded_to_width() {
        let t = sample();
        assert_eq!(t.len(), 3);
        assert_eq!(t.get(2, 1), Some(&Value::Empty));
    }

    #[test]
    fn lookup_is_case_and_space_insensitive() {
        let mut t = sample();
        assert_eq!(t.column_index("nome"), Some(0));
        assert_eq!(t.column_index("  cpf"), Some(1));
        t.normalize_columns();
        assert_eq!(t.columns(), &["nome".to_string(), "cpf".to_string()]);
        assert_eq!(
            t.require_column("pis"),
            Err(TransferError::MissingColumn("pis".into()))
        );
    }

    #[test]
    fn add_column_and_set() {
        let mut t = sample();
        let pis = t.add_column("PIS");
        assert_eq!(pis, 2);
        assert_eq!(t.add_column("pis"), 2);
        assert!(t.column_values(pis).all(Value::is_blank));
        t.set(0, pis, Value::text("17033259962"));
        assert_eq!(t.get(0, pis), Some(&Value::text("17033259962")));
        t.set(99, pis, Value::text("ignored"));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn retain_drops_blank_names() {
        let mut t = sample();
        let dropped = t.retain_rows(|r| !r.get(0).map_or(true, Value::is_blank));
        assert_eq!(dropped, 1);
        assert_eq!(t.get(1, 0), Some(&Value::text("Bia")));
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Number(12345678909.0).to_string(), "12345678909");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
        assert_eq!(Value::Empty.to_string(), "");
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(2022, 7, 4).unwrap()).to_string(),
            "04/07/2022"
        );
    }
}
