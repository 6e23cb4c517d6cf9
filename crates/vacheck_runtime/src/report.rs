//! Outcome reports and the text discrepancy log.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use vacheck_engine::{CheckOutcome, Correction, Pass};
use vacheck_foundation::Observation;
use vacheck_table::Codebook;

/// One correction, with positions resolved to symptom codes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    /// 1 or 2.
    pub pass: u8,
    /// `cleared`, `forced` or `restricted`.
    pub kind: String,
    /// Code of the row whose rule fired.
    pub subject: String,
    /// Code of the symptom that was written.
    pub target: String,
    /// Value before the write.
    pub previous: Observation,
    /// Value after the write.
    pub value: Observation,
}

impl CorrectionRecord {
    fn new(correction: &Correction, codebook: &Codebook) -> Self {
        let code = |position| {
            codebook
                .code(position)
                .map(|c| c.to_string())
                .unwrap_or_default()
        };
        Self {
            pass: correction.pass.number(),
            kind: correction.kind.to_string(),
            subject: code(correction.subject),
            target: code(correction.target),
            previous: correction.previous,
            value: correction.value,
        }
    }
}

/// A checked record, detached from the rule table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeReport {
    /// Record identifier.
    pub record_id: String,
    /// Cleaned values for positions `1..=N` as `y`/`n`/`.`.
    pub values: Vec<String>,
    /// Pass 1 messages in order.
    pub first_pass: Vec<String>,
    /// Pass 2 messages in order.
    pub second_pass: Vec<String>,
    /// Every correction in the order it was made.
    pub corrections: Vec<CorrectionRecord>,
}

impl OutcomeReport {
    /// Builds a report from an engine outcome.
    #[must_use]
    pub fn from_outcome(outcome: &CheckOutcome) -> Self {
        let codebook = outcome.vector.codebook();
        Self {
            record_id: outcome.record_id().to_string(),
            values: outcome
                .vector
                .values()
                .iter()
                .map(|v| v.as_marker().to_string())
                .collect(),
            first_pass: outcome.first_pass(),
            second_pass: outcome.second_pass(),
            corrections: outcome
                .log
                .iter()
                .map(|entry| CorrectionRecord::new(&entry.correction, codebook))
                .collect(),
        }
    }

    /// Returns true if nothing was corrected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.corrections.is_empty()
    }
}

/// Renders the discrepancy log for every record with corrections.
///
/// Clean records are omitted. A batch with no corrections renders a single
/// summary line.
#[must_use]
pub fn render_text(reports: &[OutcomeReport]) -> String {
    let mut out = String::new();
    let flagged: Vec<_> = reports.iter().filter(|r| !r.is_clean()).collect();
    let _ = writeln!(
        out,
        "{} of {} records had data discrepancies",
        flagged.len(),
        reports.len()
    );

    for report in flagged {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", report.record_id);
        for (heading, messages) in [
            (Pass::First, &report.first_pass),
            (Pass::Second, &report.second_pass),
        ] {
            if messages.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {heading}:");
            for message in messages {
                let _ = writeln!(out, "    {message}");
            }
        }
    }
    out
}
