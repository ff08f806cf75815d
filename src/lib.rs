//! Strudel reference-data generators.
//!
//! Compresses a Strudel documentation corpus and author-written example files
//! into flat JSONL lookup tables optimized for grep-based retrieval by AI
//! coding agents.
//!
//! # Architecture
//!
//! Three kinds of generators feed the `data/` directory:
//!
//! 1. **Extractor**: reads a strudel-docs tree and emits `functions.jsonl`,
//!    `sounds.jsonl`, and `mini-notation.jsonl`.
//!
//! 2. **Compilers**: read author-written source files (a `// @key: value`
//!    header block followed by a code body) and emit one record per file into
//!    `idioms.jsonl`, `snippets.jsonl`, and `anti-patterns.jsonl`.
//!
//! 3. **Derivers**: `functions-index.jsonl` is a category projection of the
//!    functions table, and the overlay merge patches rewrite hints into the
//!    mini-notation table.
//!
//! Every generator is a single-pass, synchronous batch transform. Tables are
//! rebuilt wholesale in memory and written with one atomic
//! temp-file-plus-rename, so an interrupted run never corrupts a good table.
//!
//! # Usage
//!
//! ```ignore
//! use strudel_refgen::{compile_idioms, layout, table};
//!
//! let data_dir = std::path::Path::new("data");
//! let outcome = compile_idioms(&layout::idioms_src_dir(data_dir))?;
//! table::write_jsonl(&layout::idioms_path(data_dir), &outcome.records)?;
//! ```

pub mod check;
pub mod compile;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod header;
pub mod index;
pub mod layout;
pub mod overlay;
pub mod table;
pub mod types;

// Re-exports
pub use check::{CheckReport, check_semantic_map};
pub use compile::{
    CompileOutcome, Rejection, compile_anti_patterns, compile_idioms, compile_snippets,
};
pub use discovery::SourceDiscovery;
pub use error::{Error, Result};
pub use extract::{ExtractReport, extract_docs};
pub use index::build_function_index;
pub use overlay::{MergeReport, merge_rewrites};
pub use types::*;

/// Tool version, stamped into `--version` output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
