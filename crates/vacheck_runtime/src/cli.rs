//! Command-line arguments and execution for `vacheck`.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use vacheck_engine::{CheckConfig, evaluate_batch};
use vacheck_foundation::{Error, Result};
use vacheck_table::{RuleTable, TableLayout};

use crate::records::RecordSet;
use crate::report::{OutcomeReport, render_text};
use crate::serialize::{save_to_file, to_json, to_msgpack};

/// How the check results are written.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Discrepancy log grouped by record and pass.
    #[default]
    Text,
    /// Pretty-printed JSON reports.
    Json,
    /// `MessagePack` reports.
    Msgpack,
}

/// Consistency-check verbal autopsy records against a probbase rule table.
#[derive(Parser, Debug, Clone)]
#[command(name = "vacheck")]
#[command(version)]
pub struct Args {
    /// Probbase rule table (CSV)
    #[arg(long, env = "VACHECK_RULES")]
    pub rules: PathBuf,

    /// Records to check (CSV, ID column then one column per symptom)
    #[arg(long, env = "VACHECK_RECORDS")]
    pub records: PathBuf,

    /// Clear not-to-be-asked symptoms whatever their value (InSilicoVA check)
    #[arg(long)]
    pub insilico: bool,

    /// Worker threads
    #[arg(long, default_value_t = 1)]
    pub workers: usize,

    /// Number of symptom rows in the rule table
    #[arg(long, default_value_t = TableLayout::INTERVA5_SYMPTOMS)]
    pub symptoms: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write results here instead of standard output
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write cleaned records here
    #[arg(long)]
    pub cleaned: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The check configuration these arguments describe.
    #[must_use]
    pub fn config(&self) -> CheckConfig {
        CheckConfig::default()
            .with_inference_mode(self.insilico)
            .with_workers(self.workers)
            .with_layout(TableLayout::with_symptom_count(self.symptoms))
    }
}

/// Counts from one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Records checked.
    pub records: usize,
    /// Records with at least one correction.
    pub flagged: usize,
}

/// Loads the rule table and records, checks every record, and writes the
/// results.
///
/// Results go to `args.output` if set, otherwise to `out`.
///
/// # Errors
///
/// Returns the first load, validation, or output error. Nothing is written
/// if loading or validation fails.
pub fn execute<W: Write>(args: &Args, out: &mut W) -> Result<RunSummary> {
    let config = args.config();
    let rules = RuleTable::load(&args.rules, &config.layout)?;
    let records = RecordSet::load(&args.records, rules.codebook())?;
    let id_header = records.id_header().to_string();

    let outcomes = evaluate_batch(records.into_records(), &rules, &config)?;
    let reports: Vec<_> = outcomes.iter().map(OutcomeReport::from_outcome).collect();
    let summary = RunSummary {
        records: reports.len(),
        flagged: reports.iter().filter(|r| !r.is_clean()).count(),
    };

    if let Some(path) = &args.cleaned {
        let mut cleaned = RecordSet::new(rules.codebook()).with_id_header(id_header);
        for outcome in outcomes {
            cleaned.push(outcome.vector)?;
        }
        cleaned.write_csv(path)?;
    }

    match (args.format, &args.output) {
        (OutputFormat::Msgpack, Some(path)) => save_to_file(&reports, path)?,
        (format, Some(path)) => {
            let bytes = render(format, &reports)?;
            fs::write(path, bytes).map_err(|e| {
                Error::io(format!("failed to write '{}': {e}", path.display()))
            })?;
        }
        (format, None) => {
            let bytes = render(format, &reports)?;
            out.write_all(&bytes)
                .and_then(|()| out.flush())
                .map_err(|e| Error::io(format!("failed to write output: {e}")))?;
        }
    }

    tracing::info!(
        records = summary.records,
        flagged = summary.flagged,
        inference_mode = config.inference_mode,
        "check complete"
    );
    Ok(summary)
}

fn render(format: OutputFormat, reports: &[OutcomeReport]) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Text => Ok(render_text(reports).into_bytes()),
        OutputFormat::Json => to_json(reports).map(|mut json| {
            json.push('\n');
            json.into_bytes()
        }),
        OutputFormat::Msgpack => to_msgpack(reports),
    }
}
