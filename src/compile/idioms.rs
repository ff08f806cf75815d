//! Idiom compiler: `*.strudel` sources → `idioms.jsonl` records.
//!
//! Required header keys: `@name`, `@cat`, `@desc`. Optional: `@notes`,
//! `@tags`, `@functions`. The code body after the header is captured verbatim
//! and must not be empty.

use super::{CompileOutcome, IdGuard, Rejection, basename};
use crate::discovery::SourceDiscovery;
use crate::error::{Error, Result};
use crate::header;
use crate::types::IdiomRecord;
use std::fs;
use std::path::Path;

pub fn compile_idioms(src_dir: &Path) -> Result<CompileOutcome<IdiomRecord>> {
    let files = SourceDiscovery::new(["strudel"]).discover(src_dir)?;

    let mut records = Vec::new();
    let mut rejected = Vec::new();
    let mut guard = IdGuard::default();

    for path in &files {
        let file = basename(path);
        match idiom_record(path, &file) {
            Ok(record) => {
                guard.claim(&record.name, &file)?;
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

fn idiom_record(path: &Path, file: &str) -> Result<IdiomRecord> {
    let content = fs::read_to_string(path)?;
    let header = header::parse(&content);

    let name = require(&header, file, "name")?;
    let cat = require(&header, file, "cat")?;
    let desc = require(&header, file, "desc")?;

    if header.body.is_empty() {
        return Err(Error::EmptyBody {
            file: file.to_string(),
        });
    }

    Ok(IdiomRecord {
        name,
        cat,
        desc,
        notes: header.get("notes").map(String::from),
        tags: list_field(&header, "tags"),
        functions: list_field(&header, "functions"),
        code: header.body,
    })
}

fn require(header: &header::Header, file: &str, key: &'static str) -> Result<String> {
    header
        .get(key)
        .map(String::from)
        .ok_or_else(|| Error::MissingKey {
            file: file.to_string(),
            key,
        })
}

fn list_field(header: &header::Header, key: &str) -> Option<Vec<String>> {
    let items = header::split_list(header.get(key)?);
    if items.is_empty() { None } else { Some(items) }
}
