//! Compilers for author-written source files.
//!
//! Each compiler scans one source directory, parses each file into a record,
//! and reports per-file problems without aborting the run. An identifier
//! collision is different: it would silently break key-unique lookups
//! downstream, so it aborts the whole run before any table is written.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

pub mod anti_patterns;
pub mod idioms;
pub mod snippets;

pub use anti_patterns::compile_anti_patterns;
pub use idioms::compile_idioms;
pub use snippets::compile_snippets;

/// A source file the compiler refused, with the reason.
#[derive(Debug)]
pub struct Rejection {
    pub file: String,
    pub error: Error,
}

/// Result of compiling one source directory.
///
/// `records` holds every file that compiled, in filename order; `rejected`
/// holds the rest. A run with rejections still writes its table from the
/// surviving records, but must exit non-zero.
#[derive(Debug)]
pub struct CompileOutcome<T> {
    pub records: Vec<T>,
    pub rejected: Vec<Rejection>,
}

impl<T> CompileOutcome<T> {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Identifier uniqueness guard across one compile run.
#[derive(Default)]
pub(crate) struct IdGuard {
    seen: HashMap<String, String>,
}

impl IdGuard {
    pub(crate) fn claim(&mut self, id: &str, file: &str) -> Result<()> {
        if let Some(first) = self.seen.get(id) {
            return Err(Error::DuplicateId {
                id: id.to_string(),
                file: file.to_string(),
                first: first.clone(),
            });
        }
        self.seen.insert(id.to_string(), file.to_string());
        Ok(())
    }
}

pub(crate) fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub(crate) fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| basename(path))
}
