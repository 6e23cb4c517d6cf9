//! Integration tests for Layer 1: Table
//!
//! Tests for loading the probbase rule table and addressing its rows.

mod loading;

/// Path to the 353-symptom rule table fixture.
pub const PROBBASE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/probbase_fixture.csv");
