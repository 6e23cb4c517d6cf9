//! Integration tests for Observation, Polarity, and SymptomCode

use vacheck_foundation::{CODE_LEN, Observation, Polarity, SymptomCode};

// =============================================================================
// Observation
// =============================================================================

#[test]
fn observation_encodings() {
    for text in ["1", "y", "Y"] {
        assert_eq!(Observation::parse(text), Some(Observation::Present));
    }
    for text in ["0", "n", "N"] {
        assert_eq!(Observation::parse(text), Some(Observation::Absent));
    }
    for text in ["", ".", "NA", "nan", "NaN"] {
        assert_eq!(Observation::parse(text), Some(Observation::Missing));
    }
    for text in ["33", "yes", "2", "-"] {
        assert_eq!(Observation::parse(text), None, "{text}");
    }
}

#[test]
fn absent_is_not_missing() {
    assert_ne!(Observation::Absent, Observation::Missing);
    assert!(Observation::Absent.is_known());
    assert!(!Observation::Missing.is_known());
    assert_eq!(Observation::default(), Observation::Missing);
}

#[test]
fn observation_markers() {
    assert_eq!(Observation::Present.as_marker(), "y");
    assert_eq!(Observation::Absent.as_marker(), "n");
    assert_eq!(Observation::Missing.as_marker(), ".");
}

// =============================================================================
// Polarity
// =============================================================================

#[test]
fn polarity_maps_to_observation() {
    assert_eq!(Observation::from(Polarity::Yes), Observation::Present);
    assert_eq!(Observation::from(Polarity::No), Observation::Absent);
    assert_eq!(Polarity::parse("Y"), Some(Polarity::Yes));
    assert_eq!(Polarity::parse("N"), Some(Polarity::No));
    assert_eq!(Polarity::parse("YN"), None);
}

// =============================================================================
// SymptomCode
// =============================================================================

#[test]
fn symptom_code_parse() {
    let code = SymptomCode::parse("i019a").unwrap();
    assert_eq!(code.as_str(), "i019a");
    assert_eq!(code.to_string(), "i019a");
    assert_eq!(CODE_LEN, 5);
}

#[test]
fn symptom_code_rejects_bad_text() {
    for text in ["i019", "i019aa", "i0-9a", ""] {
        let err = SymptomCode::parse(text).unwrap_err();
        assert!(err.is_resource_error(), "{text}");
    }
}
