use anyhow::Result;
use clap::Parser;
use rhidsheet::{
    load::{csv_path, xlsx_path},
    pipeline::{self, Outcome, RunConfig},
    report,
};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Exit status when duplicated identifiers stop the run.
const EXIT_DUPLICATES: u8 = 3;

/// Process a xlsx to csv file for rhid use
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the input XLSX file
    #[arg(value_parser = xlsx_path)]
    input_xlsx_path: PathBuf,

    /// Path to the output CSV file
    #[arg(value_parser = csv_path)]
    output_csv_path: PathBuf,

    /// Worksheet to read (default: the first one)
    #[arg(long)]
    sheet: Option<String>,

    /// Seed for generated CPF/PIS values, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        RunConfig {
            input: args.input_xlsx_path,
            output: args.output_csv_path,
            sheet: args.sheet,
            seed: args.seed,
        }
    }
}

fn main() -> Result<ExitCode> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // ─── 2) parse + validate paths ───────────────────────────────────
    let args = Args::parse();
    let config = RunConfig::from(args);
    info!(input = %config.input.display(), output = %config.output.display(), "startup");

    // ─── 3) run ──────────────────────────────────────────────────────
    let outcome = pipeline::run(&config)?;
    match &outcome {
        Outcome::Transferred { rows, columns } => {
            info!(rows, ?columns, "done");
            println!("Data transferred successfully.");
        }
        Outcome::DuplicatesFound { source, report } => {
            error!(
                cpf_rows = report.cpf.len(),
                pis_rows = report.pis.len(),
                "duplicated identifiers"
            );
            print!("{}", report::render_duplicate_report(source, report));
        }
    }
    Ok(ExitCode::from(exit_status(&outcome)))
}

/// Process status for a finished run: 0 on transfer, `EXIT_DUPLICATES` otherwise.
fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Transferred { .. } => 0,
        Outcome::DuplicatesFound { .. } => EXIT_DUPLICATES,
    }
}
