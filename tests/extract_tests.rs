//! Extractor tests against fixture documentation trees.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use strudel_refgen::error::Error;
use strudel_refgen::extract_docs;
use strudel_refgen::types::FunctionRecord;

struct Fixture {
    _temp: tempfile::TempDir,
    docs: PathBuf,
    data: PathBuf,
}

fn fixture(functions: &str, sounds: &str, patterns: &str) -> Fixture {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("docs");
    let data = temp.path().join("data");

    write(&docs.join("api/output/functions.json"), functions);
    write(&docs.join("soundbank/output/sounds.json"), sounds);
    write(&docs.join("patterns/output/patterns.json"), patterns);

    Fixture {
        _temp: temp,
        docs,
        data,
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const FUNCTIONS: &str = r#"{"categories":{
    "Effects":[
        {"name":"lpf","description":"Low-pass filter","synonyms":["cutoff"],
         "parameters":[{"name":"frequency","type":"number","description":"cutoff frequency"}],
         "examples":["s(\"bd\").lpf(800)"]},
        {"name":"hpf"}
    ],
    "Tempo":[{"name":"cpm","description":"Cycles per minute"}]
}}"#;

const SOUNDS: &str = r#"{"categories":{
    "drums":{"description":"Drum sounds","names":["bd","sd"],"aliases":{"bassdrum":"bd"}},
    "drumMachines":{"description":"Machine samples",
        "machines":["RolandTR808","LinnDrum"],
        "suffixes":["bd","sd"],
        "names":["RolandTR808_bd","RolandTR808_sd","LinnDrum_bd"],
        "sampleCounts":{"RolandTR808_bd":25,"LinnDrum_bd":3}},
    "drumMachineAliases":{"description":"Aliases","aliasMap":{"tr808":"RolandTR808"},
        "generatedNames":["tr808_bd"]}
}}"#;

const PATTERNS: &str = r#"{"miniNotation":{"tokens":[
    {"token":"!","meaning":"Replicate","description":"Repeat the element","example":"a!2"},
    {"token":"~","meaning":"Rest"}
]}}"#;

#[test]
fn extracts_all_three_tables() {
    let fx = fixture(FUNCTIONS, SOUNDS, PATTERNS);
    let report = extract_docs(&fx.docs, &fx.data).unwrap();

    assert_eq!(report.functions, 3);
    assert_eq!(report.tokens, 2);
    assert_eq!(report.skipped, 0);
    // drums + drumMachines header + 2 machine lines + aliases
    assert_eq!(report.sound_lines, 5);
}

#[test]
fn function_fields_match_the_corpus_verbatim() {
    let fx = fixture(FUNCTIONS, SOUNDS, PATTERNS);
    extract_docs(&fx.docs, &fx.data).unwrap();

    let table = fs::read_to_string(fx.data.join("functions.jsonl")).unwrap();
    let records: Vec<FunctionRecord> = table
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(records[0].name, "lpf");
    assert_eq!(records[0].cat, "Effects");
    assert_eq!(records[0].desc.as_deref(), Some("Low-pass filter"));
    assert_eq!(records[0].synonyms.as_deref(), Some(["cutoff".to_string()].as_slice()));
    let params = records[0].params.as_ref().unwrap();
    assert_eq!(params[0].name.as_deref(), Some("frequency"));
    assert_eq!(params[0].ty.as_deref(), Some("number"));

    // Absent optional fields are omitted, not null.
    let hpf_line = table.lines().find(|l| l.contains("\"hpf\"")).unwrap();
    assert_eq!(hpf_line, "{\"name\":\"hpf\",\"cat\":\"Effects\"}");
}

#[test]
fn rerun_on_unchanged_input_is_byte_identical() {
    let fx = fixture(FUNCTIONS, SOUNDS, PATTERNS);
    extract_docs(&fx.docs, &fx.data).unwrap();
    let first: Vec<String> = ["functions.jsonl", "sounds.jsonl", "mini-notation.jsonl"]
        .iter()
        .map(|f| fs::read_to_string(fx.data.join(f)).unwrap())
        .collect();

    extract_docs(&fx.docs, &fx.data).unwrap();
    let second: Vec<String> = ["functions.jsonl", "sounds.jsonl", "mini-notation.jsonl"]
        .iter()
        .map(|f| fs::read_to_string(fx.data.join(f)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn malformed_entries_are_skipped_and_counted() {
    let functions = r#"{"categories":{"Effects":[
        {"name":"lpf"},
        {"description":"no name"},
        {"name":""}
    ]}}"#;
    let patterns = r#"{"miniNotation":{"tokens":[
        {"token":"!","meaning":"Replicate"},
        {"meaning":"token missing"}
    ]}}"#;
    let fx = fixture(functions, SOUNDS, patterns);
    let report = extract_docs(&fx.docs, &fx.data).unwrap();

    assert_eq!(report.functions, 1);
    assert_eq!(report.tokens, 1);
    assert_eq!(report.skipped, 3);
}

#[test]
fn drum_machines_split_one_line_per_machine() {
    let fx = fixture(FUNCTIONS, SOUNDS, PATTERNS);
    extract_docs(&fx.docs, &fx.data).unwrap();

    let table = fs::read_to_string(fx.data.join("sounds.jsonl")).unwrap();
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(
        lines[1],
        "{\"cat\":\"drumMachines\",\"desc\":\"Machine samples\",\"machines\":[\"RolandTR808\",\"LinnDrum\"],\"suffixes\":[\"bd\",\"sd\"]}"
    );
    // Corpus counts carry through; names without a count default to 1.
    assert_eq!(
        lines[2],
        "{\"cat\":\"drumMachines\",\"machine\":\"RolandTR808\",\"sounds\":{\"RolandTR808_bd\":25,\"RolandTR808_sd\":1}}"
    );
    assert_eq!(
        lines[3],
        "{\"cat\":\"drumMachines\",\"machine\":\"LinnDrum\",\"sounds\":{\"LinnDrum_bd\":3}}"
    );
    assert_eq!(
        lines[4],
        "{\"cat\":\"drumMachineAliases\",\"desc\":\"Aliases\",\"aliasMap\":{\"tr808\":\"RolandTR808\"},\"generatedNames\":[\"tr808_bd\"]}"
    );
}

#[test]
fn mini_notation_desc_defaults_to_empty() {
    let fx = fixture(FUNCTIONS, SOUNDS, PATTERNS);
    extract_docs(&fx.docs, &fx.data).unwrap();

    let table = fs::read_to_string(fx.data.join("mini-notation.jsonl")).unwrap();
    let rest_line = table.lines().find(|l| l.contains("Rest")).unwrap();
    assert_eq!(rest_line, "{\"token\":\"~\",\"meaning\":\"Rest\",\"desc\":\"\"}");
}

#[test]
fn missing_input_file_is_fatal_with_no_output() {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("docs");
    let data = temp.path().join("data");
    write(&docs.join("api/output/functions.json"), FUNCTIONS);
    // soundbank and patterns inputs are missing

    let err = extract_docs(&docs, &data).unwrap_err();
    assert!(matches!(err, Error::MissingSource(_)));
    assert!(!data.exists());
}
