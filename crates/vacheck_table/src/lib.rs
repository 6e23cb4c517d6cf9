//! Rule table schema, codebook, and probbase loader for vacheck.
//!
//! This crate provides:
//! - [`RuleTable`] - Immutable, position-indexed rule rows
//! - [`RuleRow`] - Named rule fields for one symptom
//! - [`Codebook`] - Symptom code to position index
//! - [`RuleTableBuilder`] - Programmatic construction with load-time validation
//! - [`TableLayout`] - Expected shape of a probbase resource
//! - [`tabular`] - Minimal comma-separated reader and writer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod codebook;
pub mod loader;
pub mod row;
pub mod table;
pub mod tabular;

pub use builder::{RuleTableBuilder, SymptomSpec};
pub use codebook::Codebook;
pub use loader::{TableLayout, columns};
pub use row::{AskIfRule, DontAskRule, MAX_DONT_ASK, NeonateOnlyRule, PriorRow, RuleRef, RuleRow};
pub use table::RuleTable;
