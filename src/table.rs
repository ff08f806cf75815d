//! Line-delimited JSON table I/O.
//!
//! One JSON object per line, UTF-8, compact separators, no trailing wrapper.
//! Writers build the whole table in memory and land it with a single
//! temp-file-plus-rename, so a run that dies partway never leaves a
//! half-written table behind a previously good one.

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Serialize `records` one per line and atomically replace `path`.
///
/// Returns the number of bytes written.
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<u64> {
    let mut buf = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buf, record)?;
        buf.push(b'\n');
    }
    atomic_write(path, &buf)?;
    Ok(buf.len() as u64)
}

/// Read a table into typed records, skipping blank lines.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        records.push(serde_json::from_str(line)?);
    }
    Ok(records)
}

/// Read a table as raw JSON objects, preserving fields the record types do
/// not know about. Used where a table is patched rather than regenerated.
pub fn read_objects(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line)? {
            Value::Object(map) => records.push(map),
            _ => {
                return Err(Error::InvalidRecord {
                    file: path.display().to_string(),
                    line: i + 1,
                });
            }
        }
    }
    Ok(records)
}

fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir)?;
    }
    // The temp file lives in the destination directory so the rename stays on
    // one filesystem.
    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        name: String,
        n: u32,
    }

    #[test]
    fn roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("rows.jsonl");
        let rows = vec![
            Row {
                name: "a".into(),
                n: 1,
            },
            Row {
                name: "b".into(),
                n: 2,
            },
        ];
        write_jsonl(&path, &rows).unwrap();
        let back: Vec<Row> = read_jsonl(&path).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn compact_one_object_per_line() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("rows.jsonl");
        write_jsonl(
            &path,
            &[Row {
                name: "a".into(),
                n: 1,
            }],
        )
        .unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\"name\":\"a\",\"n\":1}\n");
    }

    #[test]
    fn write_creates_parent_dirs_and_replaces() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("rows.jsonl");
        write_jsonl(
            &path,
            &[Row {
                name: "old".into(),
                n: 1,
            }],
        )
        .unwrap();
        write_jsonl(
            &path,
            &[Row {
                name: "new".into(),
                n: 2,
            }],
        )
        .unwrap();
        let back: Vec<Row> = read_jsonl(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].name, "new");
    }

    #[test]
    fn read_objects_rejects_non_objects() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("rows.jsonl");
        fs::write(&path, "{\"ok\":1}\n[1,2]\n").unwrap();
        let err = read_objects(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));
    }
}
