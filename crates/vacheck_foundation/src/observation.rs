//! Tri-state symptom observations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The recorded value of a single symptom.
///
/// Comparison is by value: `Absent` and `Missing` are distinct and never
/// compare equal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Observation {
    /// Symptom reported present (`1`).
    Present,
    /// Symptom reported absent (`0`).
    Absent,
    /// No usable answer.
    #[default]
    Missing,
}

impl Observation {
    /// Returns true for `Present` and `Absent`.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Missing)
    }

    /// Returns true for `Missing`.
    #[must_use]
    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the numeric encoding (`1` or `0`), or `None` when missing.
    #[must_use]
    pub const fn as_number(self) -> Option<u8> {
        match self {
            Self::Present => Some(1),
            Self::Absent => Some(0),
            Self::Missing => None,
        }
    }

    /// Builds an observation from its numeric encoding.
    ///
    /// Only `0` and `1` are accepted.
    #[must_use]
    pub const fn from_number(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Present),
            0 => Some(Self::Absent),
            _ => None,
        }
    }

    /// Parses the text encoding used in record files.
    ///
    /// `1`/`y`/`Y` is present, `0`/`n`/`N` is absent, and an empty cell,
    /// `.`, `NA`, `nan` or `NaN` is missing. Returns `None` for anything else.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "1" | "y" | "Y" => Some(Self::Present),
            "0" | "n" | "N" => Some(Self::Absent),
            "" | "." | "NA" | "nan" | "NaN" => Some(Self::Missing),
            _ => None,
        }
    }

    /// Returns the record-file encoding (`y`, `n` or `.`).
    #[must_use]
    pub const fn as_marker(self) -> &'static str {
        match self {
            Self::Present => "y",
            Self::Absent => "n",
            Self::Missing => ".",
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Absent => write!(f, "absent"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// The `Y`/`N` polarity character carried by rule cells and trigger flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// `Y`
    Yes,
    /// `N`
    No,
}

impl Polarity {
    /// Parses a single polarity character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'Y' => Some(Self::Yes),
            'N' => Some(Self::No),
            _ => None,
        }
    }

    /// Parses a polarity from a whole cell (`"Y"` or `"N"`).
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// The observation this polarity stands for.
    #[must_use]
    pub const fn observation(self) -> Observation {
        match self {
            Self::Yes => Observation::Present,
            Self::No => Observation::Absent,
        }
    }

    /// The polarity character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Yes => 'Y',
            Self::No => 'N',
        }
    }
}

impl From<Polarity> for Observation {
    fn from(polarity: Polarity) -> Self {
        polarity.observation()
    }
}
