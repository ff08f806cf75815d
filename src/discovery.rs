//! Source-file discovery for the compilers.
//!
//! Lists author-written source files under a directory, filtered by extension
//! and optional exclude globs, in lexicographic order so every compile pass
//! visits files in the same order and table diffs stay stable.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovers compiler source files in an author directory.
pub struct SourceDiscovery {
    /// Extensions to accept (no leading dot).
    extensions: Vec<String>,
    /// Additional exclude patterns, matched against paths relative to the root.
    exclude_patterns: Vec<String>,
    /// Whether to include dot- and underscore-prefixed files.
    include_hidden: bool,
}

impl SourceDiscovery {
    /// Accept files carrying any of the given extensions.
    pub fn new<S: Into<String>>(extensions: impl IntoIterator<Item = S>) -> Self {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            exclude_patterns: Vec::new(),
            include_hidden: false,
        }
    }

    /// Add an exclude glob.
    pub fn with_exclude(mut self, pattern: &str) -> Self {
        self.exclude_patterns.push(pattern.to_string());
        self
    }

    /// Include dot- and underscore-prefixed files.
    pub fn include_hidden(mut self) -> Self {
        self.include_hidden = true;
        self
    }

    /// List matching files under `root`, sorted by path.
    ///
    /// A missing root is an error: a typoed source directory must not look
    /// like an empty corpus.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(Error::MissingSource(root.to_path_buf()));
        }

        let excludes = build_globset(&self.exclude_patterns)?;
        let mut files = Vec::new();

        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !self.matches_extension(path) {
                continue;
            }
            if !self.include_hidden && is_hidden(path) {
                continue;
            }
            let rel = path.strip_prefix(root).unwrap_or(path);
            if excludes.is_match(rel) {
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|e| e == ext)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.') || n.starts_with('_'))
        .unwrap_or(false)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
