//! Core types and errors for vacheck.
//!
//! This crate provides:
//! - [`Observation`] - The tri-state value of a single symptom
//! - [`Polarity`] - The polarity character used in rule cells
//! - [`SymptomCode`] - Five-character symptom identifiers
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod code;
pub mod error;
pub mod observation;

pub use code::{CODE_LEN, SymptomCode};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use observation::{Observation, Polarity};
