//! The two-pass consistency engine.
//!
//! Each pass visits rows `1..=N` in ascending order and applies, per row:
//! 1. Dependency suppression (`dont_ask`)
//! 2. Conditional inference (`ask_if`)
//! 3. Neonate restriction (`neonate_only`)
//!
//! The vector is mutated in place, so later rules and the second pass see
//! every earlier correction. Exactly two passes run; corrections that would
//! need a third are left as they are.

use std::sync::Arc;

use vacheck_foundation::{Error, Observation, Result};
use vacheck_table::{RuleRow, RuleTable};

use crate::config::CheckConfig;
use crate::log::{
    Correction, CorrectionKind, LogEntry, MessageLog, Pass, cleared_message, forced_message,
    restricted_message,
};
use crate::vector::SymptomVector;

// =============================================================================
// Check Outcome
// =============================================================================

/// Result of checking one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    /// The cleaned vector.
    pub vector: SymptomVector,
    /// Every correction made, split by pass.
    pub log: MessageLog,
}

impl CheckOutcome {
    /// The record identifier.
    #[must_use]
    pub fn record_id(&self) -> &str {
        self.vector.id()
    }

    /// Pass 1 messages in order.
    #[must_use]
    pub fn first_pass(&self) -> Vec<String> {
        self.log.messages(Pass::First).map(str::to_string).collect()
    }

    /// Pass 2 messages in order.
    #[must_use]
    pub fn second_pass(&self) -> Vec<String> {
        self.log.messages(Pass::Second).map(str::to_string).collect()
    }

    /// Returns true if nothing was corrected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.log.is_empty()
    }
}

// =============================================================================
// Consistency Engine
// =============================================================================

/// Applies a rule table to symptom vectors.
#[derive(Clone, Copy, Debug)]
pub struct ConsistencyEngine<'r> {
    rules: &'r RuleTable,
    inference_mode: bool,
}

impl<'r> ConsistencyEngine<'r> {
    /// Creates an engine with inference mode off.
    #[must_use]
    pub fn new(rules: &'r RuleTable) -> Self {
        Self {
            rules,
            inference_mode: false,
        }
    }

    /// Creates an engine from a configuration.
    #[must_use]
    pub fn from_config(rules: &'r RuleTable, config: &CheckConfig) -> Self {
        Self::new(rules).with_inference_mode(config.inference_mode)
    }

    /// Sets inference mode.
    #[must_use]
    pub fn with_inference_mode(mut self, inference_mode: bool) -> Self {
        self.inference_mode = inference_mode;
        self
    }

    /// The rule table.
    #[must_use]
    pub fn rules(&self) -> &'r RuleTable {
        self.rules
    }

    /// Whether inference mode is on.
    #[must_use]
    pub fn inference_mode(&self) -> bool {
        self.inference_mode
    }

    /// Checks that `vector` was built against this engine's rule table.
    ///
    /// # Errors
    ///
    /// Returns `InputShape` if the lengths differ, or a resource error if
    /// the vector's codes differ from the table's.
    pub fn check_compatible(&self, vector: &SymptomVector) -> Result<()> {
        if vector.len() != self.rules.vector_len() {
            return Err(Error::input_shape(self.rules.vector_len(), vector.len()));
        }
        if !Arc::ptr_eq(vector.codebook(), self.rules.codebook())
            && vector.codebook() != self.rules.codebook()
        {
            return Err(Error::resource(format!(
                "record {} was built against a different symptom list",
                vector.id()
            )));
        }
        Ok(())
    }

    /// Runs both passes over `vector`.
    ///
    /// # Errors
    ///
    /// Fails only if the vector does not match the rule table (see
    /// [`ConsistencyEngine::check_compatible`]); the vector is not touched in
    /// that case. Evaluation itself cannot fail.
    pub fn evaluate(&self, vector: SymptomVector) -> Result<CheckOutcome> {
        self.check_compatible(&vector)?;
        Ok(self.run(vector))
    }

    /// Runs both passes over a vector already known to be compatible.
    pub(crate) fn run(&self, mut vector: SymptomVector) -> CheckOutcome {
        let mut log = MessageLog::new();

        for pass in Pass::ALL {
            for row in self.rules.rows() {
                self.apply_dont_ask(pass, row, &mut vector, &mut log);
                self.apply_ask_if(pass, row, &mut vector, &mut log);
                self.apply_neonate_only(pass, row, &mut vector, &mut log);
            }
        }

        tracing::debug!(
            record = vector.id(),
            first_pass = log.first_pass().len(),
            second_pass = log.second_pass().len(),
            "checked record"
        );
        CheckOutcome { vector, log }
    }

    /// Clears the subject when a dependent holds the suppressing polarity.
    fn apply_dont_ask(
        &self,
        pass: Pass,
        row: &RuleRow,
        vector: &mut SymptomVector,
        log: &mut MessageLog,
    ) {
        for rule in &row.dont_ask {
            // Re-read each time: an earlier rule may have cleared the subject.
            let subject = vector.slot(row.position);
            let dependent = vector.slot(rule.dependent.position);

            if subject.is_known()
                && dependent.is_known()
                && (subject == row.subst || self.inference_mode)
                && dependent == rule.required()
            {
                vector.put(row.position, Observation::Missing);
                let message =
                    cleared_message(vector.id(), row, self.rules.referenced(rule.dependent));
                record(
                    log,
                    Correction {
                        pass,
                        kind: CorrectionKind::Cleared,
                        subject: row.position,
                        trigger: rule.dependent.position,
                        target: row.position,
                        previous: subject,
                        value: Observation::Missing,
                    },
                    message,
                );
            }
        }
    }

    /// Forces the dependent when the subject holds its trigger value.
    fn apply_ask_if(
        &self,
        pass: Pass,
        row: &RuleRow,
        vector: &mut SymptomVector,
        log: &mut MessageLog,
    ) {
        let Some(rule) = row.ask_if else {
            return;
        };
        let subject = vector.slot(row.position);
        if !subject.is_known() || subject != row.subst {
            return;
        }

        let dependent = vector.slot(rule.dependent.position);
        if dependent != rule.target() && row.subst != dependent {
            vector.put(rule.dependent.position, rule.target());
            let message = forced_message(vector.id(), row, self.rules.referenced(rule.dependent));
            record(
                log,
                Correction {
                    pass,
                    kind: CorrectionKind::Forced,
                    subject: row.position,
                    trigger: rule.dependent.position,
                    target: rule.dependent.position,
                    previous: dependent,
                    value: rule.target(),
                },
                message,
            );
        }
    }

    /// Clears the subject's trigger value unless the record is a neonate.
    fn apply_neonate_only(
        &self,
        pass: Pass,
        row: &RuleRow,
        vector: &mut SymptomVector,
        log: &mut MessageLog,
    ) {
        let Some(rule) = row.neonate_only else {
            return;
        };
        let subject = vector.slot(row.position);
        if !subject.is_known() {
            return;
        }

        let indicator = match vector.slot(rule.indicator.position) {
            Observation::Missing => Observation::Absent,
            known => known,
        };
        if subject == row.subst && indicator != Observation::Present {
            vector.put(row.position, Observation::Missing);
            let message = restricted_message(vector.id(), row);
            record(
                log,
                Correction {
                    pass,
                    kind: CorrectionKind::Restricted,
                    subject: row.position,
                    trigger: rule.indicator.position,
                    target: row.position,
                    previous: subject,
                    value: Observation::Missing,
                },
                message,
            );
        }
    }
}

fn record(log: &mut MessageLog, correction: Correction, message: String) {
    tracing::trace!(
        pass = %correction.pass,
        kind = %correction.kind,
        subject = correction.subject,
        target = correction.target,
        "{message}"
    );
    log.push(LogEntry {
        correction,
        message,
    });
}

/// Checks one record against a rule table.
///
/// # Errors
///
/// See [`ConsistencyEngine::evaluate`].
pub fn evaluate(
    vector: SymptomVector,
    rules: &RuleTable,
    inference_mode: bool,
) -> Result<CheckOutcome> {
    ConsistencyEngine::new(rules)
        .with_inference_mode(inference_mode)
        .evaluate(vector)
}
