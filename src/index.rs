//! Category index derivation.
//!
//! Projects `functions.jsonl` down to one record per category with the
//! sorted member names, for fast coarse browsing. The index is lossless over
//! the base table and regenerated wholesale; it is never hand-edited.

use crate::error::{Error, Result};
use crate::table;
use crate::types::CategoryIndexRecord;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Group the function table by category. Categories and names both sort
/// lexicographically so reruns are byte-identical.
pub fn build_function_index(functions_path: &Path) -> Result<Vec<CategoryIndexRecord>> {
    if !functions_path.is_file() {
        return Err(Error::MissingTable {
            path: functions_path.to_path_buf(),
        });
    }

    let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in table::read_objects(functions_path)? {
        let name = record.get("name").and_then(Value::as_str).unwrap_or("");
        let cat = record.get("cat").and_then(Value::as_str).unwrap_or("");
        if name.is_empty() || cat.is_empty() {
            continue;
        }
        categories
            .entry(cat.to_string())
            .or_default()
            .push(name.to_string());
    }

    Ok(categories
        .into_iter()
        .map(|(cat, mut names)| {
            names.sort();
            CategoryIndexRecord { cat, names }
        })
        .collect())
}
