//! Anti-pattern compiler: `*.yaml` sources → `anti-patterns.jsonl`.
//!
//! Each file is a YAML mapping with non-empty `bad`, `why`, and `good`
//! strings; the record id is the filename minus its extension. Trailing
//! whitespace from block scalars is stripped.

use super::{CompileOutcome, IdGuard, Rejection, basename, stem};
use crate::discovery::SourceDiscovery;
use crate::error::{Error, Result};
use crate::types::AntiPatternRecord;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawAntiPattern {
    #[serde(default)]
    bad: Option<String>,
    #[serde(default)]
    why: Option<String>,
    #[serde(default)]
    good: Option<String>,
}

pub fn compile_anti_patterns(src_dir: &Path) -> Result<CompileOutcome<AntiPatternRecord>> {
    let files = SourceDiscovery::new(["yaml"]).discover(src_dir)?;

    let mut records = Vec::new();
    let mut rejected = Vec::new();
    let mut guard = IdGuard::default();

    for path in &files {
        let file = basename(path);
        match anti_pattern_record(path, &file) {
            Ok(record) => {
                guard.claim(&record.id, &file)?;
                records.push(record);
            }
            Err(error) => {
                tracing::warn!("{error}");
                rejected.push(Rejection { file, error });
            }
        }
    }

    Ok(CompileOutcome { records, rejected })
}

fn anti_pattern_record(path: &Path, file: &str) -> Result<AntiPatternRecord> {
    let content = fs::read_to_string(path)?;
    let raw: RawAntiPattern =
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidYaml {
            file: file.to_string(),
            message: e.to_string(),
        })?;

    Ok(AntiPatternRecord {
        id: stem(path),
        bad: require(raw.bad, file, "bad")?,
        why: require(raw.why, file, "why")?,
        good: require(raw.good, file, "good")?,
    })
}

fn require(value: Option<String>, file: &str, field: &'static str) -> Result<String> {
    let value = value.map(|v| v.trim_end().to_string()).unwrap_or_default();
    if value.is_empty() {
        return Err(Error::MissingField {
            file: file.to_string(),
            field,
        });
    }
    Ok(value)
}
