//! Snippet indexer: `*.strudel` / `*.str` sources → `snippets.jsonl`.
//!
//! Unlike idioms, the code is not duplicated into the table; each record only
//! carries metadata and the source filename, so readers open the file itself
//! when they want the code.

use super::{CompileOutcome, IdGuard, Rejection, basename};
use crate::discovery::SourceDiscovery;
use crate::error::{Error, Result};
use crate::header;
use crate::types::SnippetRecord;
use std::fs;
use std::path::Path;

pub fn compile_snippets(src_dir: &Path) -> Result<CompileOutcome<SnippetRecord>> {
    let files = SourceDiscovery::new(["strudel", "str"]).discover(src_dir)?;

    let mut records = Vec::new();
    let mut rejected = Vec::new();
    let mut guard = IdGuard::default();

    for path in &files {
        let file = basename(path);
        match snippet_record(path, &file) {
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

fn snippet_record(path: &Path, file: &str) -> Result<SnippetRecord> {
    let content = fs::read_to_string(path)?;
    let header = header::parse(&content);

    let name = header
        .get("name")
        .map(String::from)
        .ok_or_else(|| Error::MissingKey {
            file: file.to_string(),
            key: "name",
        })?;
    let desc = header
        .get("desc")
        .map(String::from)
        .ok_or_else(|| Error::MissingKey {
            file: file.to_string(),
            key: "desc",
        })?;

    let tags = header
        .get("tags")
        .map(header::split_list)
        .filter(|t| !t.is_empty());

    Ok(SnippetRecord {
        name,
        file: file.to_string(),
        desc,
        tags,
    })
}
