//! The immutable rule table.

use std::sync::Arc;

use vacheck_foundation::SymptomCode;

use crate::codebook::Codebook;
use crate::row::{PriorRow, RuleRef, RuleRow};

/// Position-indexed rule rows for every symptom.
///
/// Rows `1..=symptom_count()` biject with vector positions; the prior row is
/// held separately and never evaluated. A table is immutable once built and
/// can be shared read-only across threads.
#[derive(Clone, Debug)]
pub struct RuleTable {
    prior: PriorRow,
    /// `rows[i]` is position `i + 1`.
    rows: Vec<RuleRow>,
    codebook: Arc<Codebook>,
}

impl RuleTable {
    pub(crate) fn from_parts(prior: PriorRow, rows: Vec<RuleRow>, codebook: Arc<Codebook>) -> Self {
        debug_assert_eq!(rows.len(), codebook.len());
        Self {
            prior,
            rows,
            codebook,
        }
    }

    /// Number of symptom rows (`N`).
    #[must_use]
    pub fn symptom_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of a vector checked against this table (`1 + N`).
    #[must_use]
    pub fn vector_len(&self) -> usize {
        self.rows.len() + 1
    }

    /// Returns the row at `position` (`1..=N`).
    #[must_use]
    pub fn row(&self, position: usize) -> Option<&RuleRow> {
        position.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    /// Returns the row for `code`.
    #[must_use]
    pub fn row_by_code(&self, code: SymptomCode) -> Option<&RuleRow> {
        self.codebook.position(code).and_then(|p| self.row(p))
    }

    /// Returns the row a rule reference points at.
    ///
    /// # Panics
    ///
    /// Panics if `rule_ref` was resolved against a different table.
    #[must_use]
    pub fn referenced(&self, rule_ref: RuleRef) -> &RuleRow {
        &self.rows[rule_ref.position - 1]
    }

    /// Iterates rows in ascending position order.
    pub fn rows(&self) -> impl Iterator<Item = &RuleRow> {
        self.rows.iter()
    }

    /// The shared code index.
    #[must_use]
    pub fn codebook(&self) -> &Arc<Codebook> {
        &self.codebook
    }

    /// The prior row.
    #[must_use]
    pub fn prior(&self) -> &PriorRow {
        &self.prior
    }

    /// Total number of declared rules across all rows.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| {
                r.dont_ask.len()
                    + usize::from(r.ask_if.is_some())
                    + usize::from(r.neonate_only.is_some())
            })
            .sum()
    }
}
