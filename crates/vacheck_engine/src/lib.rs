//! Symptom vectors, validation, and the two-pass consistency engine.
//!
//! This crate provides:
//! - [`SymptomVector`] - One record's tri-state observations
//! - [`ConsistencyEngine`] - Two-pass rule evaluation
//! - [`MessageLog`] - Ordered audit trail, split by pass
//! - [`CheckConfig`] - Engine and batch settings
//! - [`evaluate_batch`] - Independent evaluation of many records

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod batch;
pub mod config;
pub mod engine;
pub mod log;
pub mod vector;


pub use batch::evaluate_batch;
pub use config::CheckConfig;
pub use engine::{CheckOutcome, ConsistencyEngine, evaluate};
pub use log::{Correction, CorrectionKind, LogEntry, MessageLog, Pass};
pub use vector::SymptomVector;
