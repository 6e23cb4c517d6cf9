//! Record validation tests

use vacheck_engine::SymptomVector;
use vacheck_foundation::{ErrorKind, Observation};

use crate::{probbase, record};

#[test]
fn short_record_is_a_shape_error() {
    let rules = probbase();
    let mut fields = record("d1", &[]);
    fields.pop();

    let err = SymptomVector::from_fields("d1", &fields, rules.codebook()).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InputShape {
            expected: 354,
            actual: 353
        }
    ));
}

#[test]
fn long_record_is_a_shape_error() {
    let rules = probbase();
    let mut fields = record("d1", &[]);
    fields.push("y".to_string());

    let err = SymptomVector::from_fields("d1", &fields, rules.codebook()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InputShape { actual: 355, .. }));
}

#[test]
fn out_of_domain_value_rejected() {
    let rules = probbase();
    let fields = record("d1", &[(10, "33")]);

    let err = SymptomVector::from_fields("d1", &fields, rules.codebook()).unwrap_err();
    match err.kind {
        ErrorKind::InputDomain { position, value } => {
            assert_eq!(position, 10);
            assert_eq!(value, "33");
        }
        other => panic!("expected InputDomain, got {other:?}"),
    }
}

#[test]
fn empty_identifier_rejected() {
    let rules = probbase();
    let fields = record("", &[(4, "y")]);

    let err = SymptomVector::from_fields("", &fields, rules.codebook()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InputIdentifier(_)));
}

#[test]
fn identifier_slot_disagreeing_with_record_id_rejected() {
    let rules = probbase();
    let fields = record("d2", &[(4, "y")]);

    let err = SymptomVector::from_fields("d1", &fields, rules.codebook()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InputIdentifier(_)));
    assert!(err.is_input_error());
}

#[test]
fn shape_is_checked_before_domain() {
    let rules = probbase();
    let mut fields = record("d1", &[(10, "33")]);
    fields.pop();

    let err = SymptomVector::from_fields("d1", &fields, rules.codebook()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InputShape { .. }));
}

#[test]
fn identifier_is_checked_before_domain() {
    let rules = probbase();
    let fields = record("", &[(10, "33")]);

    let err = SymptomVector::from_fields("", &fields, rules.codebook()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InputIdentifier(_)));
}

#[test]
fn all_encodings_accepted() {
    let rules = probbase();
    let fields = record(
        "d1",
        &[(1, "1"), (2, "Y"), (3, "0"), (4, "N"), (5, "NA"), (6, ""), (7, "nan")],
    );

    let vector = SymptomVector::from_fields("d1", &fields, rules.codebook()).unwrap();
    assert_eq!(vector.get(1), Some(Observation::Present));
    assert_eq!(vector.get(2), Some(Observation::Present));
    assert_eq!(vector.get(3), Some(Observation::Absent));
    assert_eq!(vector.get(4), Some(Observation::Absent));
    assert_eq!(vector.get(5), Some(Observation::Missing));
    assert_eq!(vector.get(6), Some(Observation::Missing));
    assert_eq!(vector.get(7), Some(Observation::Missing));
    assert_eq!(vector.known_count(), 4);
}
