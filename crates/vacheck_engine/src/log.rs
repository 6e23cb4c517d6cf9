//! Ordered audit trail of corrections.
//!
//! Every mutation the engine makes is appended here with its rendered
//! message. Entries are never reordered or deduplicated.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use vacheck_foundation::Observation;
use vacheck_table::RuleRow;

// =============================================================================
// Pass
// =============================================================================

/// One of the two evaluation sweeps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Pass {
    /// Pass 1.
    First,
    /// Pass 2.
    Second,
}

impl Pass {
    /// Both passes in execution order.
    pub const ALL: [Pass; 2] = [Pass::First, Pass::Second];

    /// Pass number as printed in reports (1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first pass"),
            Self::Second => write!(f, "second pass"),
        }
    }
}

// =============================================================================
// Correction
// =============================================================================

/// Which rule category made a correction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CorrectionKind {
    /// Dependency suppression cleared the subject.
    Cleared,
    /// Conditional inference forced the dependent.
    Forced,
    /// Neonate restriction cleared the subject.
    Restricted,
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cleared => write!(f, "cleared"),
            Self::Forced => write!(f, "forced"),
            Self::Restricted => write!(f, "restricted"),
        }
    }
}

/// A single mutation of a vector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Correction {
    /// Pass in which it happened.
    pub pass: Pass,
    /// Rule category.
    pub kind: CorrectionKind,
    /// Row whose rule fired.
    pub subject: usize,
    /// The other symptom the rule consulted (dependent or neonate indicator).
    pub trigger: usize,
    /// Position that was written.
    pub target: usize,
    /// Value before the write.
    pub previous: Observation,
    /// Value after the write.
    pub value: Observation,
}

/// A correction and its human-readable message.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LogEntry {
    /// What changed.
    pub correction: Correction,
    /// Rendered audit message.
    pub message: String,
}

// =============================================================================
// Messages
// =============================================================================

/// Message for a dependency suppression.
///
/// The dependent slot names `dependent.who`. The InterVA-5 consistency
/// check prints the subject row's `who` there instead, so its logs repeat
/// the subject's category twice.
#[must_use]
pub fn cleared_message(record_id: &str, subject: &RuleRow, dependent: &RuleRow) -> String {
    format!(
        "{record_id}   {} ({}) value inconsistent with {} ({}) - cleared in working information",
        subject.long_desc, subject.who, dependent.who, dependent.short_desc
    )
}

/// Message for a conditional inference.
#[must_use]
pub fn forced_message(record_id: &str, subject: &RuleRow, dependent: &RuleRow) -> String {
    format!(
        "{record_id}   {} ({})  not flagged in category {} ({}) - updated in working information",
        dependent.who, dependent.short_desc, subject.who, subject.short_desc
    )
}

/// Message for a neonate restriction.
#[must_use]
pub fn restricted_message(record_id: &str, subject: &RuleRow) -> String {
    format!(
        "{record_id}   {} ({}) only required for neonates - cleared in working information",
        subject.who, subject.short_desc
    )
}

// =============================================================================
// Message Log
// =============================================================================

/// Corrections from one evaluation, split by pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MessageLog {
    first_pass: Vec<LogEntry>,
    second_pass: Vec<LogEntry>,
}

impl MessageLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to its pass.
    pub fn push(&mut self, entry: LogEntry) {
        match entry.correction.pass {
            Pass::First => self.first_pass.push(entry),
            Pass::Second => self.second_pass.push(entry),
        }
    }

    /// Entries for one pass, in the order they were made.
    #[must_use]
    pub fn entries(&self, pass: Pass) -> &[LogEntry] {
        match pass {
            Pass::First => &self.first_pass,
            Pass::Second => &self.second_pass,
        }
    }

    /// Messages for one pass.
    pub fn messages(&self, pass: Pass) -> impl Iterator<Item = &str> {
        self.entries(pass).iter().map(|e| e.message.as_str())
    }

    /// Pass 1 entries.
    #[must_use]
    pub fn first_pass(&self) -> &[LogEntry] {
        &self.first_pass
    }

    /// Pass 2 entries.
    #[must_use]
    pub fn second_pass(&self) -> &[LogEntry] {
        &self.second_pass
    }

    /// All entries, pass 1 first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.first_pass.iter().chain(&self.second_pass)
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.first_pass.len() + self.second_pass.len()
    }

    /// Returns true if nothing was corrected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_pass.is_empty() && self.second_pass.is_empty()
    }
}
