// src/pipeline.rs

use anyhow::{Context, Result};
use rand::Rng;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::{
    dates,
    ident::{is_valid_cpf, is_valid_pis, IdentifierGenerator},
    load::{read_delimited, read_spreadsheet, write_delimited},
    table::{find_duplicates, merge, Table, Value},
    TransferError, COL_ADMISSION, COL_CPF, COL_NAME, COL_PIS,
};

/// Everything one run needs; built from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Source spreadsheet (`.xlsx`).
    pub input: PathBuf,
    /// Existing `;`-separated target, rewritten in place.
    pub output: PathBuf,
    /// Worksheet name; the first sheet when `None`.
    pub sheet: Option<String>,
    /// Fixed seed for identifier generation.
    pub seed: Option<u64>,
}

/// Counters reported after the source has been cleaned and filled.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PrepareStats {
    pub dropped: usize,
    pub cpf_generated: usize,
    pub pis_generated: usize,
    pub dates_defaulted: usize,
}

/// Row positions (in the prepared source) that share an identifier.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DuplicateReport {
    pub cpf: Vec<usize>,
    pub pis: Vec<usize>,
}

impl DuplicateReport {
    pub fn is_clean(&self) -> bool {
        self.cpf.is_empty() && self.pis.is_empty()
    }
}

#[derive(Debug)]
pub enum Outcome {
    /// Target rewritten; `columns` are the ones copied from the source.
    Transferred { rows: usize, columns: Vec<String> },
    /// Nothing written. `source` is the prepared table the positions refer to.
    DuplicatesFound {
        source: Table,
        report: DuplicateReport,
    },
}

/// Clean and fill the source table in place.
///
/// Column names are normalized, rows without a name are dropped, and blank
/// CPF/PIS/admission date cells are filled. Present identifiers are stored as
/// the text that will be written out, so the duplicate scan sees what the
/// target file gets. Present dates are reformatted; one that does not parse
/// aborts with `DateParse`.
pub fn prepare_source<R: Rng>(
    table: &mut Table,
    generator: &mut IdentifierGenerator<R>,
    today: &str,
) -> Result<PrepareStats, TransferError> {
    let mut stats = PrepareStats::default();

    table.normalize_columns();
    let name_col = table.require_column(COL_NAME)?;
    stats.dropped = table.retain_rows(|row| !row.get(name_col).map_or(true, Value::is_blank));
    if stats.dropped > 0 {
        info!(dropped = stats.dropped, "rows without `{}` dropped", COL_NAME);
    }

    let cpf_col = table.add_column(COL_CPF);
    let pis_col = table.add_column(COL_PIS);
    let date_col = table.add_column(COL_ADMISSION);

    for row in 0..table.len() {
        let cpf = table.get(row, cpf_col).cloned().unwrap_or(Value::Empty);
        if cpf.is_blank() {
            table.set(row, cpf_col, Value::Text(generator.generate_taxpayer_id()));
            stats.cpf_generated += 1;
        } else {
            // stored as text so a numeric cell equals its text twin
            let rendered = cpf.to_string();
            if !is_valid_cpf(&rendered) {
                warn!(row, cpf = %rendered, "existing CPF fails check digits; kept as is");
            }
            table.set(row, cpf_col, Value::Text(rendered));
        }

        let pis = table.get(row, pis_col).cloned().unwrap_or(Value::Empty);
        if pis.is_blank() {
            table.set(row, pis_col, Value::Text(generator.generate_social_insurance_id()));
            stats.pis_generated += 1;
        } else {
            let rendered = pis.to_string();
            if !is_valid_pis(&rendered) {
                warn!(row, pis = %rendered, "existing PIS fails check digits; kept as is");
            }
            table.set(row, pis_col, Value::Text(rendered));
        }

        let date = table.get(row, date_col).cloned().unwrap_or(Value::Empty);
        let formatted = if date.is_blank() {
            stats.dates_defaulted += 1;
            today.to_string()
        } else {
            dates::normalize(&date)?
        };
        table.set(row, date_col, Value::Text(formatted));
    }

    info!(
        rows = table.len(),
        cpf_generated = stats.cpf_generated,
        pis_generated = stats.pis_generated,
        dates_defaulted = stats.dates_defaulted,
        "source prepared"
    );
    Ok(stats)
}

/// Run both identifier checks; neither short-circuits the other.
pub fn check_duplicates(table: &Table) -> Result<DuplicateReport, TransferError> {
    Ok(DuplicateReport {
        cpf: find_duplicates(table, COL_CPF)?,
        pis: find_duplicates(table, COL_PIS)?,
    })
}

/// Load, fill, validate, merge and persist.
///
/// The target is only read once validation passes and is written exactly
/// once; on duplicates it is left byte-for-byte as it was.
#[tracing::instrument(level = "info", skip_all, fields(input = %config.input.display(), output = %config.output.display()))]
pub fn run(config: &RunConfig) -> Result<Outcome> {
    // ─── 1) load + fill the source ───────────────────────────────────
    let mut source = read_spreadsheet(&config.input, config.sheet.as_deref())?;
    let mut generator = match config.seed {
        Some(seed) => IdentifierGenerator::seeded(seed),
        None => IdentifierGenerator::from_entropy(),
    };
    prepare_source(&mut source, &mut generator, &dates::today_string())
        .with_context(|| format!("preparing {}", config.input.display()))?;

    // ─── 2) duplicate gate ───────────────────────────────────────────
    let report = check_duplicates(&source)?;
    if !report.is_clean() {
        warn!(
            cpf_rows = report.cpf.len(),
            pis_rows = report.pis.len(),
            "duplicated identifiers; target left untouched"
        );
        return Ok(Outcome::DuplicatesFound { source, report });
    }

    // ─── 3) merge into the target and persist ────────────────────────
    let mut target = read_delimited(&config.output)?;
    target.normalize_columns();
    let columns: Vec<String> = source
        .columns()
        .iter()
        .filter(|c| target.column_index(c).is_some())
        .cloned()
        .collect();

    let merged = merge(&source, target);
    write_delimited(&config.output, &merged)?;
    info!(rows = merged.len(), ?columns, "target rewritten");

    Ok(Outcome::Transferred {
        rows: merged.len(),
        columns,
    })
}
