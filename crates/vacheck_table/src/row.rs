//! Named rule fields for one symptom.

use vacheck_foundation::{Observation, Polarity, SymptomCode};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Maximum number of dependency rules a row may declare.
pub const MAX_DONT_ASK: usize = 8;

/// A resolved reference to another symptom.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RuleRef {
    /// Referenced symptom code.
    pub code: SymptomCode,
    /// Its position in the vector.
    pub position: usize,
}

/// Dependency suppression: if the dependent symptom holds `polarity`, this
/// symptom cannot independently hold its trigger value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DontAskRule {
    /// The dependent symptom.
    pub dependent: RuleRef,
    /// Polarity of the dependent that suppresses this symptom.
    pub polarity: Polarity,
}

impl DontAskRule {
    /// The dependent value that triggers suppression.
    #[must_use]
    pub fn required(&self) -> Observation {
        self.polarity.observation()
    }
}

/// Conditional inference: if this symptom holds its trigger value, the
/// dependent symptom is forced to `polarity`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AskIfRule {
    /// The dependent symptom.
    pub dependent: RuleRef,
    /// Value the dependent is forced to.
    pub polarity: Polarity,
}

impl AskIfRule {
    /// The value the dependent is forced to.
    #[must_use]
    pub fn target(&self) -> Observation {
        self.polarity.observation()
    }
}

/// Neonate restriction: this symptom's trigger value is only valid when the
/// neonate indicator is present.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NeonateOnlyRule {
    /// The neonate indicator symptom.
    pub indicator: RuleRef,
}

/// Rules and descriptions for one symptom position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RuleRow {
    /// Vector position (`1..=N`).
    pub position: usize,
    /// Symptom code.
    pub code: SymptomCode,
    /// Short description (`sdesc`).
    pub short_desc: String,
    /// Long description (`qdesc`).
    pub long_desc: String,
    /// Who is asked (`who`).
    pub who: String,
    /// Trigger value that activates this row's rules.
    pub subst: Observation,
    /// Dependency rules in declared order.
    pub dont_ask: Vec<DontAskRule>,
    /// Inference rule.
    pub ask_if: Option<AskIfRule>,
    /// Neonate restriction.
    pub neonate_only: Option<NeonateOnlyRule>,
}

impl RuleRow {
    /// Returns true if the row declares no rules at all.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.dont_ask.is_empty() && self.ask_if.is_none() && self.neonate_only.is_none()
    }

    /// Positions this row reads or writes besides its own.
    pub fn dependencies(&self) -> impl Iterator<Item = usize> + '_ {
        self.dont_ask
            .iter()
            .map(|r| r.dependent.position)
            .chain(self.ask_if.iter().map(|r| r.dependent.position))
            .chain(self.neonate_only.iter().map(|r| r.indicator.position))
    }
}

/// The leading prior row. It is kept for its descriptions only and never
/// evaluated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PriorRow {
    /// Short description.
    pub short_desc: String,
    /// Long description.
    pub long_desc: String,
}
