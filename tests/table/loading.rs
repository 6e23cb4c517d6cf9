//! Probbase loading tests

use vacheck_foundation::{Observation, Polarity, SymptomCode};
use vacheck_table::{RuleTable, TableLayout};

use crate::PROBBASE;

fn code(s: &str) -> SymptomCode {
    SymptomCode::parse(s).unwrap()
}

fn fixture() -> RuleTable {
    RuleTable::load(PROBBASE, &TableLayout::interva5()).unwrap()
}

// =============================================================================
// Shape
// =============================================================================

#[test]
fn fixture_has_interva5_shape() {
    let table = fixture();
    assert_eq!(table.symptom_count(), 353);
    assert_eq!(table.vector_len(), 354);
    assert_eq!(table.prior().long_desc, "Prior probability");
    assert_eq!(table.rule_count(), 10);
}

#[test]
fn rows_follow_file_order() {
    let table = fixture();
    for (i, row) in table.rows().enumerate() {
        assert_eq!(row.position, i + 1);
        assert_eq!(row.code.as_str(), format!("i{:03}a", i + 1));
    }
    assert_eq!(table.codebook().position(code("i353a")), Some(353));
}

#[test]
fn wrong_layout_rejected() {
    let err = RuleTable::load(PROBBASE, &TableLayout::with_symptom_count(352)).unwrap_err();
    assert!(err.is_resource_error());
    assert!(format!("{err}").contains("probbase_fixture.csv"));
}

// =============================================================================
// Rule Fields
// =============================================================================

#[test]
fn dont_ask_rules_resolved() {
    let table = fixture();
    let row = table.row_by_code(code("i006a")).unwrap();

    assert_eq!(row.short_desc, "fever cont");
    assert_eq!(row.who, "continuous fever");
    assert_eq!(row.subst, Observation::Present);
    assert_eq!(row.dont_ask.len(), 2);
    assert_eq!(row.dont_ask[0].dependent.position, 4);
    assert_eq!(row.dont_ask[0].polarity, Polarity::No);
    assert_eq!(row.dont_ask[1].dependent.code, code("i005a"));
    assert_eq!(table.referenced(row.dont_ask[1].dependent).short_desc, "fever 2w");
}

#[test]
fn ask_if_and_neonate_only_resolved() {
    let table = fixture();

    let prod = table.row_by_code(code("i012a")).unwrap();
    assert_eq!(prod.long_desc, "Was the cough productive, with sputum?");
    let ask_if = prod.ask_if.unwrap();
    assert_eq!(ask_if.dependent.position, 10);
    assert_eq!(ask_if.target(), Observation::Present);

    let suckle = table.row_by_code(code("i031a")).unwrap();
    assert_eq!(suckle.neonate_only.unwrap().indicator.position, 19);
    assert_eq!(suckle.dont_ask[0].dependent.position, 30);
}

#[test]
fn absent_trigger_rows() {
    let table = fixture();
    let walk_aid = table.row(61).unwrap();
    assert_eq!(walk_aid.subst, Observation::Absent);
    assert_eq!(walk_aid.dont_ask[0].required(), Observation::Present);
}

#[test]
fn generic_rows_are_inert() {
    let table = fixture();
    assert!(table.row(1).unwrap().is_inert());
    assert!(table.row(353).unwrap().is_inert());
    assert!(!table.row(5).unwrap().is_inert());
}

#[test]
fn reader_and_file_agree() {
    let text = std::fs::read_to_string(PROBBASE).unwrap();
    let from_reader = RuleTable::from_reader(text.as_bytes(), &TableLayout::default()).unwrap();
    let from_file = fixture();
    let codes = |t: &RuleTable| t.rows().map(|r| r.code).collect::<Vec<_>>();
    assert_eq!(codes(&from_reader), codes(&from_file));
    assert_eq!(from_reader.rule_count(), from_file.rule_count());
}

#[test]
fn open_quote_names_its_line() {
    let text = std::fs::read_to_string(PROBBASE).unwrap();
    let broken: Vec<String> = text
        .lines()
        .enumerate()
        .map(|(i, line)| if i == 9 { line.replacen(',', ",\"", 1) } else { line.to_string() })
        .collect();

    let err =
        RuleTable::from_reader(broken.join("\n").as_bytes(), &TableLayout::default()).unwrap_err();
    assert!(err.is_resource_error());
    assert_eq!(err.context.and_then(|c| c.line), Some(10));
}
