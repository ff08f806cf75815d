//! Semantic-map cross-reference lint.
//!
//! The semantic map is the only hand-authored table; nothing regenerates it,
//! so its pointers into the other tables can rot silently. This check loads
//! every generated table and reports each `grep_cat`, function, idiom, sound,
//! or anti-pattern reference that no longer resolves.

use crate::error::{Error, Result};
use crate::layout;
use crate::table;
use crate::types::SemanticMapRecord;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// Outcome of one check run. `problems` holds one human-readable line per
/// dangling reference.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckReport {
    pub entries: usize,
    pub problems: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

pub fn check_semantic_map(data_dir: &Path) -> Result<CheckReport> {
    let map_path = layout::semantic_map_path(data_dir);
    if !map_path.is_file() {
        return Err(Error::MissingSource(map_path));
    }

    let entries: Vec<SemanticMapRecord> = table::read_jsonl(&map_path)?;

    let functions = read_required(&layout::functions_path(data_dir))?;
    let idioms = read_required(&layout::idioms_path(data_dir))?;
    let anti_patterns = read_required(&layout::anti_patterns_path(data_dir))?;
    let sounds = read_required(&layout::sounds_path(data_dir))?;

    let function_names = field_set(&functions, "name");
    let function_cats = field_set(&functions, "cat");
    let idiom_names = field_set(&idioms, "name");
    let anti_pattern_ids = field_set(&anti_patterns, "id");
    let sound_names = sound_name_set(&sounds);

    let mut problems = Vec::new();
    for entry in &entries {
        let label = entry.terms.first().map(String::as_str).unwrap_or("?");

        if !function_cats.contains(&entry.grep_cat) {
            problems.push(format!("{label}: unknown category {:?}", entry.grep_cat));
        }
        report_missing(&mut problems, label, "function", &entry.key_functions, &function_names);
        report_missing(&mut problems, label, "idiom", &entry.idioms, &idiom_names);
        report_missing(&mut problems, label, "sound", &entry.sounds, &sound_names);
        report_missing(
            &mut problems,
            label,
            "anti-pattern",
            &entry.anti_patterns,
            &anti_pattern_ids,
        );
    }

    Ok(CheckReport {
        entries: entries.len(),
        problems,
    })
}

fn read_required(path: &Path) -> Result<Vec<Map<String, Value>>> {
    if !path.is_file() {
        return Err(Error::MissingTable {
            path: path.to_path_buf(),
        });
    }
    table::read_objects(path)
}

fn field_set(records: &[Map<String, Value>], field: &str) -> HashSet<String> {
    records
        .iter()
        .filter_map(|r| r.get(field).and_then(Value::as_str))
        .map(String::from)
        .collect()
}

/// Everything a semantic-map `sounds` entry may point at: plain names,
/// aliases, per-machine sound names, machine prefixes, and generated alias
/// names.
fn sound_name_set(records: &[Map<String, Value>]) -> HashSet<String> {
    let mut set = HashSet::new();
    for record in records {
        for key in ["names", "generatedNames"] {
            if let Some(items) = record.get(key).and_then(Value::as_array) {
                set.extend(items.iter().filter_map(Value::as_str).map(String::from));
            }
        }
        for key in ["aliases", "aliasMap", "sounds", "sampleCounts"] {
            if let Some(map) = record.get(key).and_then(Value::as_object) {
                set.extend(map.keys().cloned());
            }
        }
        if let Some(machine) = record.get("machine").and_then(Value::as_str) {
            set.insert(machine.to_string());
        }
        if let Some(machines) = record.get("machines").and_then(Value::as_array) {
            set.extend(machines.iter().filter_map(Value::as_str).map(String::from));
        }
    }
    set
}

fn report_missing(
    problems: &mut Vec<String>,
    label: &str,
    kind: &str,
    refs: &[String],
    known: &HashSet<String>,
) {
    for name in refs {
        if !known.contains(name) {
            problems.push(format!("{label}: unknown {kind} {name:?}"));
        }
    }
}
