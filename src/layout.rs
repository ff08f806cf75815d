//! Fixed file layout of the data directory.
//!
//! Every generator reads and writes well-known paths under one data
//! directory; this module is the single place those names live.

use std::path::{Path, PathBuf};

/// Default data directory, relative to the working directory.
pub const DATA_DIR: &str = "data";
/// Default snippets source directory.
pub const SNIPPETS_DIR: &str = "snippets";

pub const FUNCTIONS_TABLE: &str = "functions.jsonl";
pub const SOUNDS_TABLE: &str = "sounds.jsonl";
pub const MINI_NOTATION_TABLE: &str = "mini-notation.jsonl";
pub const IDIOMS_TABLE: &str = "idioms.jsonl";
pub const SNIPPETS_TABLE: &str = "snippets.jsonl";
pub const ANTI_PATTERNS_TABLE: &str = "anti-patterns.jsonl";
pub const FUNCTIONS_INDEX_TABLE: &str = "functions-index.jsonl";
/// Hand-authored; validated by `refgen check`, never generated.
pub const SEMANTIC_MAP_TABLE: &str = "semantic-map.jsonl";
/// Hand-authored overlay consumed by `refgen merge-rewrites`.
pub const REWRITES_OVERLAY: &str = "mini-notation-rewrites.json";

pub fn functions_path(data_dir: &Path) -> PathBuf {
    data_dir.join(FUNCTIONS_TABLE)
}

pub fn sounds_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SOUNDS_TABLE)
}

pub fn mini_notation_path(data_dir: &Path) -> PathBuf {
    data_dir.join(MINI_NOTATION_TABLE)
}

pub fn idioms_path(data_dir: &Path) -> PathBuf {
    data_dir.join(IDIOMS_TABLE)
}

pub fn snippets_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SNIPPETS_TABLE)
}

pub fn anti_patterns_path(data_dir: &Path) -> PathBuf {
    data_dir.join(ANTI_PATTERNS_TABLE)
}

pub fn functions_index_path(data_dir: &Path) -> PathBuf {
    data_dir.join(FUNCTIONS_INDEX_TABLE)
}

pub fn semantic_map_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SEMANTIC_MAP_TABLE)
}

pub fn rewrites_overlay_path(data_dir: &Path) -> PathBuf {
    data_dir.join(REWRITES_OVERLAY)
}

/// Author-written idiom sources (`*.strudel`).
pub fn idioms_src_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("idioms")
}

/// Author-written anti-pattern sources (`*.yaml`).
pub fn anti_patterns_src_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("anti-patterns")
}

/// Required inputs under the strudel-docs root, checked before extraction.
pub const DOCS_INPUTS: [&str; 3] = [
    "api/output/functions.json",
    "soundbank/output/sounds.json",
    "patterns/output/patterns.json",
];

pub fn docs_functions_path(docs_root: &Path) -> PathBuf {
    docs_root.join(DOCS_INPUTS[0])
}

pub fn docs_sounds_path(docs_root: &Path) -> PathBuf {
    docs_root.join(DOCS_INPUTS[1])
}

pub fn docs_patterns_path(docs_root: &Path) -> PathBuf {
    docs_root.join(DOCS_INPUTS[2])
}
