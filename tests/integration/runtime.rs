//! Runtime layer tests: record files, reports, and serialization

use std::fs;

use vacheck_engine::{CheckConfig, evaluate_batch};
use vacheck_runtime::{
    Args, OutcomeReport, OutputFormat, RecordSet, execute, from_msgpack, render_text, to_json,
    to_msgpack,
};

use crate::{PROBBASE, RECORDS, probbase};

fn reports() -> Vec<OutcomeReport> {
    let rules = probbase();
    let records = RecordSet::load(RECORDS, rules.codebook()).unwrap();
    evaluate_batch(records.into_records(), &rules, &CheckConfig::default())
        .unwrap()
        .iter()
        .map(OutcomeReport::from_outcome)
        .collect()
}

fn args() -> Args {
    Args {
        rules: PROBBASE.into(),
        records: RECORDS.into(),
        insilico: false,
        workers: 2,
        symptoms: 353,
        format: OutputFormat::Text,
        output: None,
        cleaned: None,
        verbose: false,
    }
}

#[test]
fn record_file_round_trip() {
    let rules = probbase();
    let records = RecordSet::load(RECORDS, rules.codebook()).unwrap();
    let text = records.to_csv_string();

    assert_eq!(text, fs::read_to_string(RECORDS).unwrap());
    let reparsed = RecordSet::from_csv_str(&text, rules.codebook()).unwrap();
    assert_eq!(reparsed.records(), records.records());
}

#[test]
fn text_report_groups_by_pass() {
    let text = render_text(&reports());

    assert!(text.starts_with("4 of 6 records had data discrepancies\n"));
    let d4 = text.find("\nd4\n").unwrap();
    let first = text[d4..].find("first pass:").unwrap();
    let second = text[d4..].find("second pass:").unwrap();
    assert!(first < second);
    assert!(!text.contains("\nd5\n"));
}

#[test]
fn msgpack_reports_round_trip() {
    let reports = reports();
    let bytes = to_msgpack(&reports).unwrap();
    assert_eq!(from_msgpack(&bytes).unwrap(), reports);
}

#[test]
fn json_report_values_are_markers() {
    let json = to_json(&reports()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["record_id"], "d1");
    assert_eq!(value[0]["values"][4], ".");
    assert_eq!(value[1]["values"][9], "y");
    assert_eq!(value[3]["second_pass"].as_array().unwrap().len(), 1);
}

#[test]
fn cli_writes_log_and_cleaned_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = args();
    args.output = Some(dir.path().join("log.txt"));
    args.cleaned = Some(dir.path().join("cleaned.csv"));
    let mut stdout = Vec::new();

    let summary = execute(&args, &mut stdout).unwrap();
    assert_eq!(summary.records, 6);
    assert_eq!(summary.flagged, 4);
    assert!(stdout.is_empty());

    let log = fs::read_to_string(dir.path().join("log.txt")).unwrap();
    assert_eq!(log, render_text(&reports()));

    let rules = probbase();
    let cleaned = RecordSet::load(dir.path().join("cleaned.csv"), rules.codebook()).unwrap();
    let rechecked =
        evaluate_batch(cleaned.into_records(), &rules, &CheckConfig::default()).unwrap();
    assert!(rechecked.iter().all(vacheck_engine::CheckOutcome::is_clean));
}

#[test]
fn cli_json_to_stdout() {
    let mut args = args();
    args.format = OutputFormat::Json;
    let mut stdout = Vec::new();

    execute(&args, &mut stdout).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 6);
}
