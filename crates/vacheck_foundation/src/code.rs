//! Five-character symptom codes.
//!
//! Codes such as `i004a` name a symptom across the rule table, record files,
//! and audit messages. They are stored inline so they are `Copy` and cheap to
//! hash.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Length of every symptom code.
pub const CODE_LEN: usize = 5;

/// A validated five-character ASCII alphanumeric symptom code.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymptomCode([u8; CODE_LEN]);

impl SymptomCode {
    /// Parses a code, rejecting any other length or non-alphanumeric bytes.
    ///
    /// # Errors
    ///
    /// Returns a resource error if `text` is not a valid code.
    pub fn parse(text: &str) -> Result<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != CODE_LEN || !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return Err(Error::resource(format!(
                "invalid symptom code {text:?}: expected {CODE_LEN} ASCII letters or digits"
            )));
        }
        let mut code = [0u8; CODE_LEN];
        code.copy_from_slice(bytes);
        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII bytes are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for SymptomCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SymptomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for SymptomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymptomCode({})", self.as_str())
    }
}

#[cfg(feature = "serde")]
impl Serialize for SymptomCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SymptomCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
