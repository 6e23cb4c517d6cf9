//! Two-pass evaluation tests against the fixture probbase

use vacheck_engine::{ConsistencyEngine, CorrectionKind, Pass, SymptomVector, evaluate};
use vacheck_foundation::Observation;

use crate::{probbase, record};

fn vector(id: &str, set: &[(usize, &str)]) -> SymptomVector {
    let rules = probbase();
    SymptomVector::from_fields(id, &record(id, set), rules.codebook()).unwrap()
}

// =============================================================================
// Dependency Suppression
// =============================================================================

#[test]
fn suppression_clears_subject_with_one_message() {
    let rules = probbase();
    let v = SymptomVector::from_fields("d1", &record("d1", &[(4, "n"), (5, "y")]), rules.codebook())
        .unwrap();

    let out = evaluate(v, &rules, false).unwrap();

    assert_eq!(out.vector.get(5), Some(Observation::Missing));
    assert_eq!(out.vector.get(4), Some(Observation::Absent));
    let first = out.first_pass();
    assert_eq!(first.len(), 1);
    assert!(first[0].starts_with("d1   "));
    assert!(first[0].contains("Did the fever last for two weeks or more?"));
    assert!(first[0].contains("fever (fever)"));
    assert!(first[0].ends_with("cleared in working information"));
    assert!(out.second_pass().is_empty());
}

#[test]
fn suppression_needs_trigger_value_unless_inferring() {
    let rules = probbase();
    let fields = record("d1", &[(4, "n"), (5, "n")]);
    let make = || SymptomVector::from_fields("d1", &fields, rules.codebook()).unwrap();

    let interva = ConsistencyEngine::new(&rules).evaluate(make()).unwrap();
    assert!(interva.is_clean());
    assert_eq!(interva.vector.get(5), Some(Observation::Absent));

    let insilico = ConsistencyEngine::new(&rules)
        .with_inference_mode(true)
        .evaluate(make())
        .unwrap();
    assert_eq!(insilico.vector.get(5), Some(Observation::Missing));
    assert_eq!(insilico.first_pass().len(), 1);
}

#[test]
fn missing_dependent_never_suppresses() {
    let rules = probbase();
    let out = evaluate(vector("d1", &[(5, "y")]), &rules, true).unwrap();
    assert!(out.is_clean());
}

#[test]
fn first_matching_rule_wins() {
    let rules = probbase();
    // Row 6 has two dependency rules; once cleared, the second cannot fire.
    let out = evaluate(vector("d1", &[(4, "n"), (6, "y")]), &rules, false).unwrap();
    let cleared: Vec<_> = out
        .log
        .iter()
        .filter(|e| e.correction.subject == 6)
        .collect();
    assert_eq!(cleared.len(), 1);
    assert_eq!(cleared[0].correction.trigger, 4);
}

// =============================================================================
// Conditional Inference
// =============================================================================

#[test]
fn inference_forces_dependent() {
    let rules = probbase();
    let out = evaluate(vector("d2", &[(10, "n"), (12, "y")]), &rules, false).unwrap();

    assert_eq!(out.vector.get(10), Some(Observation::Present));
    let entry = &out.log.first_pass()[0];
    assert_eq!(entry.correction.kind, CorrectionKind::Forced);
    assert_eq!(entry.correction.target, 10);
    assert_eq!(entry.correction.previous, Observation::Absent);
    assert!(entry.message.ends_with("updated in working information"));
}

#[test]
fn inference_fills_missing_dependent() {
    let rules = probbase();
    let out = evaluate(vector("d2", &[(12, "y")]), &rules, false).unwrap();
    assert_eq!(out.vector.get(10), Some(Observation::Present));
}

#[test]
fn inference_skipped_when_subject_differs() {
    let rules = probbase();
    let out = evaluate(vector("d2", &[(10, "n"), (12, "n")]), &rules, false).unwrap();
    assert!(out.is_clean());
}

// =============================================================================
// Neonate Restriction
// =============================================================================

#[test]
fn missing_neonate_indicator_counts_as_absent() {
    let rules = probbase();
    let out = evaluate(vector("d3", &[(30, "y")]), &rules, false).unwrap();
    assert_eq!(out.vector.get(30), Some(Observation::Missing));
    assert_eq!(out.log.first_pass()[0].correction.kind, CorrectionKind::Restricted);
}

#[test]
fn neonate_keeps_neonatal_symptoms() {
    let rules = probbase();
    let out = evaluate(vector("d3", &[(19, "y"), (30, "y"), (31, "y")]), &rules, false).unwrap();
    assert!(out.is_clean());
}

// =============================================================================
// Second Pass
// =============================================================================

#[test]
fn second_pass_sees_later_corrections() {
    let rules = probbase();
    let out = evaluate(vector("d4", &[(40, "y"), (50, "n"), (55, "y")]), &rules, false).unwrap();

    assert_eq!(out.log.first_pass()[0].correction.target, 50);
    let second = out.log.second_pass();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].correction.pass, Pass::Second);
    assert_eq!(second[0].correction.subject, 40);
    assert_eq!(out.vector.get(40), Some(Observation::Missing));
}

#[test]
fn checked_output_is_stable() {
    let rules = probbase();
    let once = evaluate(vector("d4", &[(40, "y"), (50, "n"), (55, "y")]), &rules, false).unwrap();
    let twice = evaluate(once.vector.clone(), &rules, false).unwrap();
    assert!(twice.is_clean());
    assert_eq!(twice.vector, once.vector);
}

#[test]
fn identifier_is_untouched() {
    let rules = probbase();
    let out = evaluate(vector("d4", &[(40, "y"), (50, "n"), (55, "y")]), &rules, true).unwrap();
    assert_eq!(out.record_id(), "d4");
    assert_eq!(out.vector.to_fields()[0], "d4");
}
