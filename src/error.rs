// src/error.rs

use thiserror::Error;

/// Failures raised by the table and date layers.
///
/// I/O problems are carried as `anyhow` context chains instead; these are the
/// data problems a caller may want to match on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("column `{0}` not found")]
    MissingColumn(String),

    #[error("cannot parse `{0}` as a date")]
    DateParse(String),

    #[error("spreadsheet `{0}` has no header row")]
    EmptySheet(String),

    #[error("worksheet `{0}` not found")]
    SheetNotFound(String),
}
