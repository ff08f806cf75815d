//! Rewrite-hint overlay merge.
//!
//! The one generator that patches a table instead of regenerating it: a small
//! hand-authored JSON file maps mini-notation tokens to before→after rewrite
//! hints, and each hint list replaces the `rewrites` field of the matching
//! record in `mini-notation.jsonl`. Every other field is left untouched, and
//! replace-the-list semantics make the merge idempotent.
//!
//! An overlay token with no matching base record is fatal and the base table
//! is left unmodified: the overlay only ever annotates records that already
//! exist. The whole merge is validated in memory before the single atomic
//! write.

use crate::error::{Error, Result};
use crate::table;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct OverlayFile {
    #[serde(default)]
    rewrites: Map<String, Value>,
}

/// Summary of one merge run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MergeReport {
    pub merged: usize,
}

/// Merge `overlay_path` into the syntax table at `base_path`.
pub fn merge_rewrites(base_path: &Path, overlay_path: &Path) -> Result<MergeReport> {
    if !base_path.is_file() {
        return Err(Error::MissingTable {
            path: base_path.to_path_buf(),
        });
    }
    if !overlay_path.is_file() {
        return Err(Error::MissingSource(overlay_path.to_path_buf()));
    }

    let overlay: OverlayFile = serde_json::from_str(&fs::read_to_string(overlay_path)?)?;
    if overlay.rewrites.is_empty() {
        return Ok(MergeReport { merged: 0 });
    }

    let mut records = table::read_objects(base_path)?;

    let mut merged = 0;
    for (token, hints) in &overlay.rewrites {
        validate_hints(token, hints)?;
        let record = records
            .iter_mut()
            .find(|r| r.get("token").and_then(Value::as_str) == Some(token))
            .ok_or_else(|| Error::UnknownToken {
                token: token.clone(),
                path: base_path.to_path_buf(),
            })?;
        record.insert("rewrites".to_string(), hints.clone());
        merged += 1;
    }

    table::write_jsonl(base_path, &records)?;
    Ok(MergeReport { merged })
}

fn validate_hints(token: &str, hints: &Value) -> Result<()> {
    let ok = hints
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string));
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidOverlay {
            token: token.to_string(),
        })
    }
}
