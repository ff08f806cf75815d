//! refgen - CLI for the Strudel reference-data generators.
//!
//! One subcommand per generator, designed to be run by hand or from scripts.
//!
//! # Usage
//!
//! ```bash
//! # Extract functions/sounds/mini-notation tables from a strudel-docs tree
//! refgen extract ../strudel-docs
//!
//! # Compile author-written sources
//! refgen idioms
//! refgen snippets
//! refgen anti-patterns
//!
//! # Derive the category index, patch in rewrite hints
//! refgen index
//! refgen merge-rewrites
//!
//! # Validate the hand-authored semantic map
//! refgen check
//! ```
//!
//! # Design for AI Agents
//!
//! - `--json` flag outputs machine-readable JSON
//! - Errors and per-file diagnostics go to stderr, results to stdout
//! - Exit codes: 0 = success, 1 = fatal error or any rejected input file

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use strudel_refgen::{
    CheckReport, CompileOutcome, ExtractReport, build_function_index, check_semantic_map,
    compile_anti_patterns, compile_idioms, compile_snippets, extract_docs, layout, merge_rewrites,
    table,
};

#[derive(Parser)]
#[command(name = "refgen")]
#[command(version)]
#[command(about = "Compressed Strudel reference tables for coding-agent grep lookups")]
#[command(long_about = r#"
refgen rebuilds the JSONL reference tables under the data directory.

Generated tables are rebuilt wholesale and written atomically; the
hand-authored sources (idiom/snippet/anti-pattern files, the rewrites
overlay, and the semantic map) are never touched.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory holding the tables and author-written sources
    #[arg(long, global = true, default_value = layout::DATA_DIR)]
    data_dir: PathBuf,

    /// Directory of snippet source files
    #[arg(long, global = true, default_value = layout::SNIPPETS_DIR)]
    snippets_dir: PathBuf,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract functions, sounds, and mini-notation tables from strudel-docs
    Extract {
        /// Root of the strudel-docs tree
        #[arg(default_value = "../strudel-docs")]
        docs_root: PathBuf,
    },

    /// Compile data/idioms/*.strudel into idioms.jsonl
    Idioms,

    /// Index snippets/*.strudel and *.str into snippets.jsonl
    Snippets,

    /// Compile data/anti-patterns/*.yaml into anti-patterns.jsonl
    AntiPatterns,

    /// Derive functions-index.jsonl from functions.jsonl
    Index,

    /// Merge mini-notation-rewrites.json into mini-notation.jsonl
    MergeRewrites,

    /// Validate semantic-map.jsonl cross-references against the tables
    Check,

    /// Run every generator: extract, merge-rewrites, index, and the compilers
    All {
        /// Root of the strudel-docs tree
        #[arg(default_value = "../strudel-docs")]
        docs_root: PathBuf,
    },
}

fn main() -> Result<()> {
    // Logging goes to stderr only so stdout stays machine-clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match run_command(&cli) {
        Ok(output) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_human_readable(&output);
            }
            if output.failed() {
                std::process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            if cli.json {
                let err = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&err)?);
            } else {
                eprintln!("Error: {}", e);
            }
            std::process::exit(1);
        }
    }
}

fn run_command(cli: &Cli) -> Result<Output> {
    let data_dir = cli.data_dir.as_path();

    match &cli.command {
        Commands::Extract { docs_root } => {
            let report = extract_docs(docs_root, data_dir)?;
            Ok(Output::Extract { report })
        }

        Commands::Idioms => {
            let outcome = compile_idioms(&layout::idioms_src_dir(data_dir))?;
            let summary = write_table(layout::IDIOMS_TABLE, &layout::idioms_path(data_dir), outcome)?;
            Ok(Output::Compile { summary })
        }

        Commands::Snippets => {
            let outcome = compile_snippets(&cli.snippets_dir)?;
            let summary =
                write_table(layout::SNIPPETS_TABLE, &layout::snippets_path(data_dir), outcome)?;
            Ok(Output::Compile { summary })
        }

        Commands::AntiPatterns => {
            let outcome = compile_anti_patterns(&layout::anti_patterns_src_dir(data_dir))?;
            let summary = write_table(
                layout::ANTI_PATTERNS_TABLE,
                &layout::anti_patterns_path(data_dir),
                outcome,
            )?;
            Ok(Output::Compile { summary })
        }

        Commands::Index => {
            let index = build_function_index(&layout::functions_path(data_dir))?;
            let functions = index.iter().map(|r| r.names.len()).sum();
            let bytes = table::write_jsonl(&layout::functions_index_path(data_dir), &index)?;
            Ok(Output::Index {
                categories: index.len(),
                functions,
                bytes,
            })
        }

        Commands::MergeRewrites => {
            let report = merge_rewrites(
                &layout::mini_notation_path(data_dir),
                &layout::rewrites_overlay_path(data_dir),
            )?;
            Ok(Output::Merge {
                merged: report.merged,
            })
        }

        Commands::Check => {
            let report = check_semantic_map(data_dir)?;
            Ok(Output::Check { report })
        }

        Commands::All { docs_root } => run_all(cli, docs_root),
    }
}

fn run_all(cli: &Cli, docs_root: &Path) -> Result<Output> {
    let data_dir = cli.data_dir.as_path();

    let extract = extract_docs(docs_root, data_dir)?;

    // The overlay is optional; when present it must apply cleanly.
    let overlay_path = layout::rewrites_overlay_path(data_dir);
    let merged = if overlay_path.is_file() {
        Some(merge_rewrites(&layout::mini_notation_path(data_dir), &overlay_path)?.merged)
    } else {
        None
    };

    let index = build_function_index(&layout::functions_path(data_dir))?;
    table::write_jsonl(&layout::functions_index_path(data_dir), &index)?;

    let idioms = write_table(
        layout::IDIOMS_TABLE,
        &layout::idioms_path(data_dir),
        compile_idioms(&layout::idioms_src_dir(data_dir))?,
    )?;
    let snippets = write_table(
        layout::SNIPPETS_TABLE,
        &layout::snippets_path(data_dir),
        compile_snippets(&cli.snippets_dir)?,
    )?;
    let anti_patterns = write_table(
        layout::ANTI_PATTERNS_TABLE,
        &layout::anti_patterns_path(data_dir),
        compile_anti_patterns(&layout::anti_patterns_src_dir(data_dir))?,
    )?;

    Ok(Output::All {
        extract,
        merged,
        categories: index.len(),
        idioms,
        snippets,
        anti_patterns,
    })
}

/// Write a compiled table and fold the outcome into a summary. Rejected files
/// keep the run going but force a non-zero exit at the end.
fn write_table<T: Serialize>(
    table_name: &str,
    path: &Path,
    outcome: CompileOutcome<T>,
) -> Result<CompileSummary> {
    let bytes = table::write_jsonl(path, &outcome.records)?;
    Ok(CompileSummary {
        table: table_name.to_string(),
        records: outcome.records.len(),
        bytes,
        rejected: outcome
            .rejected
            .iter()
            .map(|r| RejectedFile {
                file: r.file.clone(),
                reason: r.error.to_string(),
            })
            .collect(),
    })
}

#[derive(Serialize)]
struct RejectedFile {
    file: String,
    reason: String,
}

#[derive(Serialize)]
struct CompileSummary {
    table: String,
    records: usize,
    bytes: u64,
    rejected: Vec<RejectedFile>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum Output {
    Extract {
        #[serde(flatten)]
        report: ExtractReport,
    },
    Compile {
        #[serde(flatten)]
        summary: CompileSummary,
    },
    Index {
        categories: usize,
        functions: usize,
        bytes: u64,
    },
    Merge {
        merged: usize,
    },
    Check {
        #[serde(flatten)]
        report: CheckReport,
    },
    All {
        extract: ExtractReport,
        merged: Option<usize>,
        categories: usize,
        idioms: CompileSummary,
        snippets: CompileSummary,
        anti_patterns: CompileSummary,
    },
}

impl Output {
    /// Whether the run must exit non-zero despite producing output.
    fn failed(&self) -> bool {
        match self {
            Output::Compile { summary } => !summary.rejected.is_empty(),
            Output::Check { report } => !report.is_clean(),
            Output::All {
                idioms,
                snippets,
                anti_patterns,
                ..
            } => {
                !idioms.rejected.is_empty()
                    || !snippets.rejected.is_empty()
                    || !anti_patterns.rejected.is_empty()
            }
            _ => false,
        }
    }
}

fn print_human_readable(output: &Output) {
    match output {
        Output::Extract { report } => print_extract(report),
        Output::Compile { summary } => print_compile(summary),
        Output::Index {
            categories,
            functions,
            bytes,
        } => {
            println!(
                "{}: {} categories, {} functions, {} bytes",
                layout::FUNCTIONS_INDEX_TABLE,
                categories,
                functions,
                bytes
            );
        }
        Output::Merge { merged } => {
            println!("Merged {} rewrite entries", merged);
        }
        Output::Check { report } => {
            println!("{}: {} entries", layout::SEMANTIC_MAP_TABLE, report.entries);
            if report.is_clean() {
                println!("No dangling references");
            } else {
                for problem in &report.problems {
                    println!("  {}", problem);
                }
            }
        }
        Output::All {
            extract,
            merged,
            categories,
            idioms,
            snippets,
            anti_patterns,
        } => {
            print_extract(extract);
            if let Some(merged) = merged {
                println!("Merged {} rewrite entries", merged);
            }
            println!("{}: {} categories", layout::FUNCTIONS_INDEX_TABLE, categories);
            print_compile(idioms);
            print_compile(snippets);
            print_compile(anti_patterns);
        }
    }
}

fn print_extract(report: &ExtractReport) {
    println!("{}: {} functions", layout::FUNCTIONS_TABLE, report.functions);
    println!("{}: {} lines", layout::SOUNDS_TABLE, report.sound_lines);
    println!(
        "{}: {} tokens",
        layout::MINI_NOTATION_TABLE,
        report.tokens
    );
    if report.skipped > 0 {
        println!("skipped: {} malformed entries", report.skipped);
    }
    println!("total: {} bytes", report.bytes_written);
}

fn print_compile(summary: &CompileSummary) {
    println!(
        "{}: {} records, {} bytes",
        summary.table, summary.records, summary.bytes
    );
    for rejected in &summary.rejected {
        println!("  rejected {}: {}", rejected.file, rejected.reason);
    }
}
