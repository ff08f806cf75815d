//! `// @key: value` header-block parsing.
//!
//! Author-written source files open with a comment header carrying structured
//! metadata, terminated by the first blank or non-comment line:
//!
//! ```text
//! // @name: beat-switcher
//! // @cat: live-performance
//! // @desc: Array of beat variations for live switching
//!
//! const beat = 0
//! ```
//!
//! Plain `//` comments before the first `@key` line are skipped; a plain
//! comment after keys have started ends the header. Keys are lowercased.
//! The body is everything after the header with surrounding blank lines
//! trimmed, and is never mistaken for metadata.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static KEY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//\s*@(\w+):\s*(.+)$").unwrap());

/// Parsed header fields plus the remaining body.
#[derive(Debug, Clone)]
pub struct Header {
    fields: HashMap<String, String>,
    /// Everything after the header block, surrounding blank lines trimmed.
    pub body: String,
}

impl Header {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse the leading header block of `content`.
pub fn parse(content: &str) -> Header {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut fields = HashMap::new();
    let mut body_start = 0;

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim();

        if stripped.is_empty() && fields.is_empty() {
            body_start = i + 1;
            continue;
        }

        if let Some(caps) = KEY_LINE.captures(stripped) {
            let key = caps[1].to_lowercase();
            let value = caps[2].trim().to_string();
            fields.insert(key, value);
            body_start = i + 1;
        } else if stripped.starts_with("//") && fields.is_empty() {
            // Regular comment before any metadata.
            body_start = i + 1;
        } else {
            // Blank line, plain comment after metadata, or code: header ends.
            break;
        }
    }

    let mut body_lines = &lines[body_start.min(lines.len())..];
    while let [first, rest @ ..] = body_lines {
        if first.trim().is_empty() {
            body_lines = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., last] = body_lines {
        if last.trim().is_empty() {
            body_lines = rest;
        } else {
            break;
        }
    }

    Header {
        fields,
        body: body_lines.join("\n"),
    }
}

/// Split a comma-separated header value, dropping empties.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_and_body() {
        let src = "// @name: beat-switcher\n// @cat: live-performance\n// @desc: Beat variations\n\nconst beat = 0\nbeat.fast(2)\n";
        let header = parse(src);
        assert_eq!(header.get("name"), Some("beat-switcher"));
        assert_eq!(header.get("cat"), Some("live-performance"));
        assert_eq!(header.get("desc"), Some("Beat variations"));
        assert_eq!(header.body, "const beat = 0\nbeat.fast(2)");
    }

    #[test]
    fn skips_plain_comments_before_metadata() {
        let src = "// a stray note\n// @name: x\n// @desc: y\ncode()\n";
        let header = parse(src);
        assert_eq!(header.get("name"), Some("x"));
        assert_eq!(header.body, "code()");
    }

    #[test]
    fn plain_comment_after_metadata_ends_header() {
        let src = "// @name: x\n// setup section\ncode()\n";
        let header = parse(src);
        assert_eq!(header.get("name"), Some("x"));
        assert_eq!(header.body, "// setup section\ncode()");
    }

    #[test]
    fn keys_are_lowercased() {
        let header = parse("// @Name: x\ncode()\n");
        assert_eq!(header.get("name"), Some("x"));
    }

    #[test]
    fn body_never_parsed_as_metadata() {
        let src = "// @name: x\n\n// @tempo: not metadata, part of the code\nnote()\n";
        let header = parse(src);
        assert_eq!(header.get("tempo"), None);
        assert!(header.body.contains("@tempo"));
    }

    #[test]
    fn empty_body_is_empty_string() {
        let header = parse("// @name: x\n// @desc: y\n\n\n");
        assert_eq!(header.body, "");
    }

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(
            split_list("trance, buildup , ,supersaw"),
            vec!["trance", "buildup", "supersaw"]
        );
        assert!(split_list(" , ").is_empty());
    }
}
