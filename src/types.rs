//! Record types for the generated tables.
//!
//! One struct per table line shape. Serialized key order is the struct field
//! order, and optional fields are omitted entirely rather than emitted as
//! null, so every table line stays compact and grep-friendly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One documented function (`functions.jsonl`). `name` is the table key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    pub cat: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<ParamRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
}

/// Parameter descriptor carried through from the documentation corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One line of `sounds.jsonl`.
///
/// Covers four shapes: a standard category (names/aliases/sampleCounts), the
/// drum-machine header line (machines/suffixes), one line per drum machine
/// (machine/sounds), and the drum-machine alias line (aliasMap/generatedNames).
/// Field order is chosen so each shape serializes with its expected key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SoundRecord {
    pub cat: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffixes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Map<String, Value>>,
    /// Sound name → sample count for one drum machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sounds: Option<Map<String, Value>>,
    #[serde(rename = "sampleCounts", skip_serializing_if = "Option::is_none")]
    pub sample_counts: Option<Map<String, Value>>,
    #[serde(rename = "noteCount", skip_serializing_if = "Option::is_none")]
    pub note_count: Option<u64>,
    #[serde(rename = "aliasMap", skip_serializing_if = "Option::is_none")]
    pub alias_map: Option<Map<String, Value>>,
    #[serde(rename = "generatedNames", skip_serializing_if = "Option::is_none")]
    pub generated_names: Option<Vec<String>>,
}

/// One mini-notation token (`mini-notation.jsonl`). Exactly one record per
/// documented token; `rewrites` is attached later by the overlay merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxTokenRecord {
    pub token: String,
    pub meaning: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrites: Option<Vec<String>>,
}

/// One anti-pattern (`anti-patterns.jsonl`). `id` is the source file stem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntiPatternRecord {
    pub id: String,
    pub bad: String,
    pub why: String,
    pub good: String,
}

/// One idiom (`idioms.jsonl`), code body included verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdiomRecord {
    pub name: String,
    pub cat: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<String>>,
    pub code: String,
}

/// One snippet index entry (`snippets.jsonl`). The code stays in `file`; the
/// index carries metadata only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetRecord {
    pub name: String,
    pub file: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// One category grouping (`functions-index.jsonl`): a pure projection of the
/// functions table, regenerated on demand and never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryIndexRecord {
    pub cat: String,
    pub names: Vec<String>,
}

/// One hand-authored semantic-map entry (`semantic-map.jsonl`): free-form
/// user terms mapped to pointers across the other tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMapRecord {
    pub terms: Vec<String>,
    pub grep_cat: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_functions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub idioms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sounds: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anti_patterns: Vec<String>,
}
