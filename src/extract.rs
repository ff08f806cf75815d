//! Documentation-corpus extraction.
//!
//! Reads the structured JSON files produced by a strudel-docs tree and
//! compresses them into `functions.jsonl`, `sounds.jsonl`, and
//! `mini-notation.jsonl`. Record order follows the corpus's own insertion
//! order, so re-running on unchanged input is byte-identical.
//!
//! A malformed individual entry is skipped and counted, never fatal; missing
//! input files are fatal before anything is written. All three tables are
//! built in memory first and only then written, so a failure in one input
//! cannot leave another table half-updated.

use crate::error::{Error, Result};
use crate::layout;
use crate::table;
use crate::types::{FunctionRecord, ParamRecord, SoundRecord, SyntaxTokenRecord};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Summary of one extraction run.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ExtractReport {
    pub functions: usize,
    pub sound_lines: usize,
    pub tokens: usize,
    /// Malformed entries skipped across all three inputs.
    pub skipped: usize,
    pub bytes_written: u64,
}

/// Extract all three tables from `docs_root` into `data_dir`.
pub fn extract_docs(docs_root: &Path, data_dir: &Path) -> Result<ExtractReport> {
    if !docs_root.is_dir() {
        return Err(Error::MissingSource(docs_root.to_path_buf()));
    }
    for input in layout::DOCS_INPUTS {
        let path = docs_root.join(input);
        if !path.is_file() {
            return Err(Error::MissingSource(path));
        }
    }

    let mut skipped = 0usize;
    let functions = extract_functions(&layout::docs_functions_path(docs_root), &mut skipped)?;
    let sounds = extract_sounds(&layout::docs_sounds_path(docs_root), &mut skipped)?;
    let tokens = extract_mini_notation(&layout::docs_patterns_path(docs_root), &mut skipped)?;

    let mut bytes = table::write_jsonl(&layout::functions_path(data_dir), &functions)?;
    bytes += table::write_jsonl(&layout::sounds_path(data_dir), &sounds)?;
    bytes += table::write_jsonl(&layout::mini_notation_path(data_dir), &tokens)?;

    Ok(ExtractReport {
        functions: functions.len(),
        sound_lines: sounds.len(),
        tokens: tokens.len(),
        skipped,
        bytes_written: bytes,
    })
}

fn load_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn categories_of<'a>(data: &'a Value, path: &Path) -> Result<&'a Map<String, Value>> {
    data.get("categories")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::MalformedDocs {
            path: path.to_path_buf(),
            reason: "`categories` is missing or not an object".into(),
        })
}

// ---------------------------------------------------------------------------
// functions.jsonl
// ---------------------------------------------------------------------------

fn extract_functions(path: &Path, skipped: &mut usize) -> Result<Vec<FunctionRecord>> {
    let data = load_json(path)?;
    let categories = categories_of(&data, path)?;

    let mut records = Vec::new();
    for (cat, fns) in categories {
        let Some(fns) = fns.as_array() else {
            tracing::warn!("skipping category {cat:?}: not an array");
            *skipped += 1;
            continue;
        };
        for entry in fns {
            match function_record(cat, entry) {
                Some(record) => records.push(record),
                None => {
                    tracing::warn!("skipping unusable function entry in category {cat:?}");
                    *skipped += 1;
                }
            }
        }
    }
    Ok(records)
}

fn function_record(cat: &str, entry: &Value) -> Option<FunctionRecord> {
    let name = entry.get("name")?.as_str()?;
    if name.is_empty() {
        return None;
    }
    Some(FunctionRecord {
        name: name.to_string(),
        cat: cat.to_string(),
        desc: nonempty_str(entry.get("description")),
        synonyms: nonempty_string_list(entry.get("synonyms")),
        params: param_list(entry.get("parameters")),
        examples: nonempty_string_list(entry.get("examples")),
    })
}

fn nonempty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn nonempty_string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
    )
}

fn param_list(value: Option<&Value>) -> Option<Vec<ParamRecord>> {
    let items = value?.as_array()?;
    if items.is_empty() {
        return None;
    }
    serde_json::from_value(Value::Array(items.clone())).ok()
}

fn nonempty_map(value: Option<&Value>) -> Option<Map<String, Value>> {
    value
        .and_then(Value::as_object)
        .filter(|m| !m.is_empty())
        .cloned()
}

// ---------------------------------------------------------------------------
// sounds.jsonl
// ---------------------------------------------------------------------------

fn extract_sounds(path: &Path, skipped: &mut usize) -> Result<Vec<SoundRecord>> {
    let data = load_json(path)?;
    let categories = categories_of(&data, path)?;

    let mut records = Vec::new();
    for (cat, info) in categories {
        let Some(info) = info.as_object() else {
            tracing::warn!("skipping sound category {cat:?}: not an object");
            *skipped += 1;
            continue;
        };
        match cat.as_str() {
            "drumMachines" => drum_machine_records(info, &mut records),
            "drumMachineAliases" => records.push(drum_alias_record(info)),
            _ => records.push(sound_category_record(cat, info)),
        }
    }
    Ok(records)
}

fn sound_category_record(cat: &str, info: &Map<String, Value>) -> SoundRecord {
    SoundRecord {
        cat: cat.to_string(),
        desc: Some(desc_of(info)),
        names: nonempty_string_list(info.get("names")),
        aliases: nonempty_map(info.get("aliases")),
        sample_counts: nonempty_map(info.get("sampleCounts")),
        note_count: info
            .get("noteCount")
            .and_then(Value::as_u64)
            .filter(|&n| n > 0),
        ..SoundRecord::default()
    }
}

/// Split the drum-machine category one line per machine prefix, keeping each
/// table line small. Names follow the `Machine_suffix` convention; a name
/// with no sample count in the corpus gets 1.
fn drum_machine_records(info: &Map<String, Value>, records: &mut Vec<SoundRecord>) {
    let machines = string_list(info.get("machines"));
    let sample_counts = info
        .get("sampleCounts")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let names = string_list(info.get("names"));

    // Machine -> sound name -> sample count, in corpus name order.
    let mut machine_sounds: Map<String, Value> = Map::new();
    for name in &names {
        let machine = name.split('_').next().unwrap_or(name).to_string();
        let count = sample_counts.get(name).cloned().unwrap_or(Value::from(1));
        let slot = machine_sounds
            .entry(machine)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(sounds) = slot.as_object_mut() {
            sounds.insert(name.clone(), count);
        }
    }

    records.push(SoundRecord {
        cat: "drumMachines".to_string(),
        desc: Some(desc_of(info)),
        machines: Some(machines.clone()),
        suffixes: Some(string_list(info.get("suffixes"))),
        ..SoundRecord::default()
    });

    for machine in &machines {
        let sounds = machine_sounds
            .get(machine)
            .and_then(Value::as_object)
            .filter(|s| !s.is_empty());
        if let Some(sounds) = sounds {
            records.push(SoundRecord {
                cat: "drumMachines".to_string(),
                machine: Some(machine.clone()),
                sounds: Some(sounds.clone()),
                ..SoundRecord::default()
            });
        }
    }
}

fn drum_alias_record(info: &Map<String, Value>) -> SoundRecord {
    SoundRecord {
        cat: "drumMachineAliases".to_string(),
        desc: Some(desc_of(info)),
        alias_map: nonempty_map(info.get("aliasMap")),
        generated_names: nonempty_string_list(info.get("generatedNames")),
        ..SoundRecord::default()
    }
}

fn desc_of(info: &Map<String, Value>) -> String {
    info.get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// mini-notation.jsonl
// ---------------------------------------------------------------------------

fn extract_mini_notation(path: &Path, skipped: &mut usize) -> Result<Vec<SyntaxTokenRecord>> {
    let data = load_json(path)?;
    let tokens = data
        .get("miniNotation")
        .and_then(|m| m.get("tokens"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut records = Vec::new();
    for entry in &tokens {
        match token_record(entry) {
            Some(record) => records.push(record),
            None => {
                tracing::warn!("skipping mini-notation entry without token/meaning");
                *skipped += 1;
            }
        }
    }
    Ok(records)
}

fn token_record(entry: &Value) -> Option<SyntaxTokenRecord> {
    let token = entry.get("token")?.as_str()?;
    let meaning = entry.get("meaning")?.as_str()?;
    if token.is_empty() || meaning.is_empty() {
        return None;
    }
    Some(SyntaxTokenRecord {
        token: token.to_string(),
        meaning: meaning.to_string(),
        desc: entry
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        example: nonempty_str(entry.get("example")),
        rewrites: None,
    })
}
