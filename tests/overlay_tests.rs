//! Overlay merge tests.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use strudel_refgen::error::Error;
use strudel_refgen::merge_rewrites;

fn setup(base: &str, overlay: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
    let temp = tempfile::tempdir().unwrap();
    let base_path = temp.path().join("mini-notation.jsonl");
    let overlay_path = temp.path().join("mini-notation-rewrites.json");
    fs::write(&base_path, base).unwrap();
    fs::write(&overlay_path, overlay).unwrap();
    (temp, base_path, overlay_path)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn merge_attaches_rewrites_to_matching_token() {
    let (_t, base, overlay) = setup(
        "{\"token\":\"!\",\"meaning\":\"Replicate\"}\n{\"token\":\"~\",\"meaning\":\"Rest\"}\n",
        r#"{"rewrites":{"!":["a!2 → a a"]}}"#,
    );

    let report = merge_rewrites(&base, &overlay).unwrap();
    assert_eq!(report.merged, 1);
    assert_eq!(
        read(&base),
        "{\"token\":\"!\",\"meaning\":\"Replicate\",\"rewrites\":[\"a!2 → a a\"]}\n{\"token\":\"~\",\"meaning\":\"Rest\"}\n"
    );
}

#[test]
fn merge_is_idempotent() {
    let (_t, base, overlay) = setup(
        "{\"token\":\"!\",\"meaning\":\"Replicate\",\"rewrites\":[\"stale\"]}\n",
        r#"{"rewrites":{"!":["a!2 → a a","b!3 → b b b"]}}"#,
    );

    merge_rewrites(&base, &overlay).unwrap();
    let once = read(&base);
    merge_rewrites(&base, &overlay).unwrap();
    let twice = read(&base);

    assert_eq!(once, twice);
    // Replace semantics: the stale list is gone, not appended to.
    assert!(!once.contains("stale"));
}

#[test]
fn merge_preserves_unknown_fields() {
    let (_t, base, overlay) = setup(
        "{\"token\":\"!\",\"meaning\":\"Replicate\",\"seeAlso\":[\"*\"]}\n",
        r#"{"rewrites":{"!":["a!2 → a a"]}}"#,
    );

    merge_rewrites(&base, &overlay).unwrap();
    assert!(read(&base).contains("\"seeAlso\":[\"*\"]"));
}

#[test]
fn unknown_token_fails_and_leaves_base_untouched() {
    let (_t, base, overlay) = setup(
        "{\"token\":\"!\",\"meaning\":\"Replicate\"}\n",
        r#"{"rewrites":{"?":["nope"]}}"#,
    );

    let before = read(&base);
    let err = merge_rewrites(&base, &overlay).unwrap_err();
    assert!(matches!(err, Error::UnknownToken { .. }));
    assert_eq!(read(&base), before);
}

#[test]
fn non_string_hints_are_rejected() {
    let (_t, base, overlay) = setup(
        "{\"token\":\"!\",\"meaning\":\"Replicate\"}\n",
        r#"{"rewrites":{"!":[1,2]}}"#,
    );

    let err = merge_rewrites(&base, &overlay).unwrap_err();
    assert!(matches!(err, Error::InvalidOverlay { .. }));
}

#[test]
fn empty_overlay_is_a_no_op() {
    let (_t, base, overlay) = setup(
        "{\"token\":\"!\",\"meaning\":\"Replicate\"}\n",
        r#"{"rewrites":{}}"#,
    );

    let before = read(&base);
    let report = merge_rewrites(&base, &overlay).unwrap();
    assert_eq!(report.merged, 0);
    assert_eq!(read(&base), before);
}

#[test]
fn missing_base_table_fails_fast() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("mini-notation.jsonl");
    let overlay = temp.path().join("mini-notation-rewrites.json");
    fs::write(&overlay, r#"{"rewrites":{"!":["x"]}}"#).unwrap();

    let err = merge_rewrites(&base, &overlay).unwrap_err();
    assert!(matches!(err, Error::MissingTable { .. }));
}
