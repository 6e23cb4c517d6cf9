//! Symptom vectors and record validation.
//!
//! A vector has `1 + N` slots: slot 0 is the record identifier and slots
//! `1..=N` hold one [`Observation`] per rule table row. Construction is the
//! validation step; a `SymptomVector` that exists is always well-formed.

use std::sync::Arc;

use vacheck_foundation::{Error, Observation, Result, SymptomCode};
use vacheck_table::Codebook;

/// One record's observations, addressable by position and by code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymptomVector {
    id: String,
    /// `values[i]` is position `i + 1`.
    values: Vec<Observation>,
    codebook: Arc<Codebook>,
}

impl SymptomVector {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Validates a raw record and builds its vector.
    ///
    /// `fields` is the full record: slot 0 is the identifier as it appears
    /// in the record, slots `1..=N` are text-encoded observations (see
    /// [`Observation::parse`]).
    ///
    /// Checks run in order and before anything else happens: element count,
    /// then identifier, then each value's domain. Slot 0 must carry the same
    /// identifier as `record_id` (surrounding whitespace ignored).
    ///
    /// # Errors
    ///
    /// - `InputShape` if `fields.len() != 1 + N`
    /// - `InputIdentifier` if `record_id` or slot 0 is empty, or they differ
    /// - `InputDomain` if any slot `1..=N` is not present, absent, or missing
    pub fn from_fields<S: AsRef<str>>(
        record_id: &str,
        fields: &[S],
        codebook: &Arc<Codebook>,
    ) -> Result<Self> {
        let expected = codebook.len() + 1;
        if fields.len() != expected {
            return Err(Error::input_shape(expected, fields.len()));
        }
        let id = validate_id(record_id)?;
        let slot = fields[0].as_ref().trim();
        if slot.is_empty() {
            return Err(Error::input_identifier("identifier slot is empty"));
        }
        if slot != id {
            return Err(Error::input_identifier(format!(
                "record ID '{id}' does not match identifier slot '{slot}'"
            )));
        }

        let values = fields[1..]
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let text = field.as_ref();
                Observation::parse(text).ok_or_else(|| Error::input_domain(i + 1, text))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id,
            values,
            codebook: Arc::clone(codebook),
        })
    }

    /// Builds a vector from already-typed observations for positions `1..=N`.
    ///
    /// # Errors
    ///
    /// - `InputShape` if `observations.len() != N` (the identifier slot is
    ///   counted, so the reported sizes include it)
    /// - `InputIdentifier` if `record_id` is empty
    pub fn from_observations(
        record_id: &str,
        observations: Vec<Observation>,
        codebook: &Arc<Codebook>,
    ) -> Result<Self> {
        if observations.len() != codebook.len() {
            return Err(Error::input_shape(codebook.len() + 1, observations.len() + 1));
        }
        Ok(Self {
            id: validate_id(record_id)?,
            values: observations,
            codebook: Arc::clone(codebook),
        })
    }

    /// Builds a vector with every symptom missing.
    ///
    /// # Errors
    ///
    /// Returns `InputIdentifier` if `record_id` is empty.
    pub fn all_missing(record_id: &str, codebook: &Arc<Codebook>) -> Result<Self> {
        Self::from_observations(record_id, vec![Observation::Missing; codebook.len()], codebook)
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// The record identifier (slot 0).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of slots, identifier included (`1 + N`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() + 1
    }

    /// Always false: the identifier slot is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of symptom slots (`N`).
    #[must_use]
    pub fn symptom_count(&self) -> usize {
        self.values.len()
    }

    /// The observation at `position` (`1..=N`); `None` for the identifier
    /// slot or out of range.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<Observation> {
        position
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
    }

    /// The observation for `code`.
    #[must_use]
    pub fn get_code(&self, code: SymptomCode) -> Option<Observation> {
        self.codebook.position(code).and_then(|p| self.get(p))
    }

    /// The observation for a code given as text.
    #[must_use]
    pub fn get_str(&self, code: &str) -> Option<Observation> {
        self.codebook.position_of_str(code).and_then(|p| self.get(p))
    }

    /// Sets the observation at `position`, returning the previous value.
    ///
    /// Returns `None` (and changes nothing) for the identifier slot or out of
    /// range.
    pub fn set(&mut self, position: usize, value: Observation) -> Option<Observation> {
        let slot = position
            .checked_sub(1)
            .and_then(|i| self.values.get_mut(i))?;
        Some(std::mem::replace(slot, value))
    }

    /// Sets the observation for `code`, returning the previous value.
    pub fn set_code(&mut self, code: SymptomCode, value: Observation) -> Option<Observation> {
        let position = self.codebook.position(code)?;
        self.set(position, value)
    }

    /// Sets the observation for a code given as text.
    pub fn set_str(&mut self, code: &str, value: Observation) -> Option<Observation> {
        let position = self.codebook.position_of_str(code)?;
        self.set(position, value)
    }

    /// Observations for positions `1..=N`.
    #[must_use]
    pub fn values(&self) -> &[Observation] {
        &self.values
    }

    /// Iterates `(position, code, observation)` in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, SymptomCode, Observation)> + '_ {
        self.codebook
            .iter()
            .zip(&self.values)
            .map(|((position, code), value)| (position, code, *value))
    }

    /// Number of symptoms that are not missing.
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_known()).count()
    }

    /// The codebook this vector was built against.
    #[must_use]
    pub fn codebook(&self) -> &Arc<Codebook> {
        &self.codebook
    }

    /// Renders the record as text fields (`id`, then `y`/`n`/`.`).
    #[must_use]
    pub fn to_fields(&self) -> Vec<String> {
        std::iter::once(self.id.clone())
            .chain(self.values.iter().map(|v| v.as_marker().to_string()))
            .collect()
    }

    // Engine access; positions come from the rule table and are in range.
    pub(crate) fn slot(&self, position: usize) -> Observation {
        self.values[position - 1]
    }

    pub(crate) fn put(&mut self, position: usize, value: Observation) -> Observation {
        std::mem::replace(&mut self.values[position - 1], value)
    }
}

fn validate_id(record_id: &str) -> Result<String> {
    let id = record_id.trim();
    if id.is_empty() {
        return Err(Error::input_identifier("record ID is empty"));
    }
    Ok(id.to_string())
}
