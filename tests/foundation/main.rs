//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Observation, Polarity, SymptomCode, and Error.

mod errors;
mod observations;
