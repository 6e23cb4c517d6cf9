//! Symptom code to position index.
//!
//! Built once per rule table and shared by every vector created from it.

use std::collections::HashMap;

use vacheck_foundation::{Error, Result, SymptomCode};

/// Bijection between symptom positions `1..=len()` and symptom codes.
///
/// Position `0` is the record identifier slot and has no code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Codebook {
    /// Codes in position order; `codes[i]` is position `i + 1`.
    codes: Vec<SymptomCode>,
    index: HashMap<SymptomCode, usize>,
}

impl Codebook {
    /// Builds a codebook from codes in position order.
    ///
    /// # Errors
    ///
    /// Returns a resource error if a code appears twice.
    pub fn new(codes: Vec<SymptomCode>) -> Result<Self> {
        let mut index = HashMap::with_capacity(codes.len());
        for (i, code) in codes.iter().enumerate() {
            if let Some(first) = index.insert(*code, i + 1) {
                return Err(Error::resource(format!(
                    "symptom code {code} appears at positions {first} and {}",
                    i + 1
                )));
            }
        }
        Ok(Self { codes, index })
    }

    /// Number of symptom positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if there are no symptom positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Returns the position of `code`.
    #[must_use]
    pub fn position(&self, code: SymptomCode) -> Option<usize> {
        self.index.get(&code).copied()
    }

    /// Looks up a code given as text.
    #[must_use]
    pub fn position_of_str(&self, code: &str) -> Option<usize> {
        SymptomCode::parse(code).ok().and_then(|c| self.position(c))
    }

    /// Returns the code at `position` (`1..=len()`).
    #[must_use]
    pub fn code(&self, position: usize) -> Option<SymptomCode> {
        position
            .checked_sub(1)
            .and_then(|i| self.codes.get(i))
            .copied()
    }

    /// Iterates `(position, code)` in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, SymptomCode)> + '_ {
        self.codes.iter().enumerate().map(|(i, c)| (i + 1, *c))
    }

    /// Codes in position order.
    #[must_use]
    pub fn codes(&self) -> &[SymptomCode] {
        &self.codes
    }
}
