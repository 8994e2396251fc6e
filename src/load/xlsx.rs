// src/load/xlsx.rs

use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;
use tracing::{debug, info};

use crate::{
    dates::excel_serial_to_date,
    table::{Table, Value},
    TransferError,
};

/// Read one worksheet into a [`Table`]. The first row is the header.
///
/// `sheet` picks a worksheet by name; by default the first one is used.
/// Fully blank rows are skipped and short rows are padded with `Empty`.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_spreadsheet<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<Table> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| TransferError::SheetNotFound(wanted.to_string()))?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| TransferError::EmptySheet(path.display().to_string()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read worksheet `{}`", sheet_name))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| TransferError::EmptySheet(path.display().to_string()))?;
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell.to_string().trim() {
            "" => format!("unnamed: {}", idx),
            name => name.to_string(),
        })
        .collect();
    debug!(?columns, "header");

    let mut table = Table::new(columns);
    let mut skipped = 0usize;
    for cells in rows {
        let values: Vec<Value> = cells.iter().map(cell_value).collect();
        if values.iter().all(Value::is_blank) {
            skipped += 1;
            continue;
        }
        table.push_row(values);
    }

    info!(sheet = %sheet_name, rows = table.len(), skipped, "spreadsheet loaded");
    Ok(table)
}

/// Map a calamine cell onto the typed [`Value`].
pub(crate) fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Empty,
        Data::String(s) => Value::Text(s.clone()),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            excel_serial_to_date(serial)
                .map(Value::Date)
                .unwrap_or(Value::Number(serial))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
    }
}
