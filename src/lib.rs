//! vacheck - Two-pass consistency checking for verbal autopsy records
//!
//! This crate re-exports all layers of the vacheck system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: vacheck_runtime    - Record files, reports, serialization, CLI
//! Layer 2: vacheck_engine     - Symptom vectors, two-pass engine, message log
//! Layer 1: vacheck_table      - Rule table, codebook, probbase loader
//! Layer 0: vacheck_foundation - Core types (Observation, SymptomCode, Error)
//! ```

pub use vacheck_engine as engine;
pub use vacheck_foundation as foundation;
pub use vacheck_runtime as runtime;
pub use vacheck_table as table;
