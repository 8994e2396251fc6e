// src/load/delimited.rs

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::{fs, path::Path};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::table::{Table, Value};

/// Field separator of the target file.
pub const DELIMITER: u8 = b';';

/// Read a `;`-separated file with a header row. Every field is kept as text;
/// empty fields become `Empty`.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_delimited<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut table = Table::new(headers);

    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        let row: Vec<Value> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Value::Empty
                } else {
                    Value::text(field)
                }
            })
            .collect();
        table.push_row(row);
    }

    info!(rows = table.len(), columns = table.columns().len(), "target loaded");
    Ok(table)
}

/// Replace `path` with `table`, header first.
///
/// The data is written to a temporary file next to `path` and renamed over it,
/// so a failure part-way leaves the original untouched.
#[tracing::instrument(level = "info", skip(path, table), fields(path = %path.as_ref().display()))]
pub fn write_delimited<P: AsRef<Path>>(path: P, table: &Table) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    {
        let mut wtr = WriterBuilder::new()
            .delimiter(DELIMITER)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(tmp.as_file_mut());
        wtr.write_record(table.columns())?;
        for row in table.rows() {
            wtr.write_record(row.cells().iter().map(Value::to_string))?;
        }
        wtr.flush()?;
    }
    tmp.as_file().sync_all()?;

    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions())
            .with_context(|| format!("copying permissions of {}", path.display()))?;
    }

    tmp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    debug!(rows = table.len(), "target written");
    Ok(())
}
