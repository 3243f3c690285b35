//! Parsers for free-form LLM output.
//!
//! Pure text processing, no I/O. Both parsers are tolerant: they never fail,
//! and an empty or degenerate result is for the caller to interpret.
//!
//! | Function | Input | Grammar |
//! |----------|-------|---------|
//! | [`parse_query_list`] | query decomposition reply | JSON string array, or a numbered / bulleted list |
//! | [`parse_reflection_response`] | reflection reply | `FINAL DRAFT` / `REMOVED CLAIMS` / `CHANGES SUMMARY` sections, or a JSON object |

use serde::Deserialize;

/// Minimum length (in chars) of a usable search query.
const MIN_QUERY_CHARS: usize = 3;

/// Extract a list of search queries from a decomposition reply.
///
/// # Grammar
///
/// 1. A JSON array of strings anywhere in the reply (a fenced code block is
///    fine) wins.
/// 2. Otherwise, every line starting with a list marker (`1.`, `2)`, `-`, `*`,
///    `•`, followed by whitespace) contributes its remainder. Lines without a
///    marker are commentary and ignored.
///
/// Items are trimmed of quotes, backticks and bold markers; items shorter
/// than three characters are dropped; case-insensitive duplicates are
/// removed, keeping the first.
///
/// # Examples
///
/// ```
/// use scribe_domain::research::parsing::parse_query_list;
///
/// let reply = "Here you go:\n1. Rust memory safety\n2. Rust async runtimes";
/// assert_eq!(parse_query_list(reply), vec!["Rust memory safety", "Rust async runtimes"]);
/// assert_eq!(parse_query_list(r#"["a query", "another query"]"#).len(), 2);
/// assert!(parse_query_list("I cannot help with that.").is_empty());
/// ```
pub fn parse_query_list(response: &str) -> Vec<String> {
    let candidates = parse_json_string_array(response).unwrap_or_else(|| {
        response
            .lines()
            .filter_map(strip_list_marker)
            .map(str::to_string)
            .collect()
    });

    let mut queries: Vec<String> = Vec::new();
    for candidate in candidates {
        let query = clean_item(&candidate);
        if query.chars().count() < MIN_QUERY_CHARS {
            continue;
        }
        if queries.iter().any(|q| q.eq_ignore_ascii_case(&query)) {
            continue;
        }
        queries.push(query);
    }
    queries
}

fn parse_json_string_array(response: &str) -> Option<Vec<String>> {
    let start = response.find('[')?;
    let end = response.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&response[start..=end]).ok()
}

/// Return the item text of a list line, or `None` if the line is not a list item.
fn strip_list_marker(line: &str) -> Option<&str> {
    let line = line.trim();

    for bullet in ['-', '*', '•'] {
        if let Some(rest) = line.strip_prefix(bullet)
            && rest.starts_with(char::is_whitespace)
        {
            return Some(rest.trim());
        }
    }

    let digits = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

fn clean_item(item: &str) -> String {
    item.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*'))
        .trim()
        .to_string()
}

/// Structured reply of the reflection step, before any deterministic checks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReflectionResponse {
    pub final_text: String,
    #[serde(default)]
    pub removed_claims: Vec<String>,
    #[serde(default)]
    pub changes_summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    FinalDraft,
    RemovedClaims,
    ChangesSummary,
}

const SECTION_HEADERS: [(&str, Section); 3] = [
    ("FINAL DRAFT", Section::FinalDraft),
    ("REMOVED CLAIMS", Section::RemovedClaims),
    ("CHANGES SUMMARY", Section::ChangesSummary),
];

/// Parse the reflection reply.
///
/// Accepts, in order of preference:
///
/// 1. A JSON object with `final_text` (and optional `removed_claims`,
///    `changes_summary`).
/// 2. Section headers `FINAL DRAFT:`, `REMOVED CLAIMS:`, `CHANGES SUMMARY:`
///    (case-insensitive, optionally decorated with `#` or `**`). Text on the
///    header line after the colon belongs to the section.
/// 3. Anything else: the whole reply is the final text.
///
/// Removed-claim entries may be bulleted or numbered; placeholder entries
/// such as `None` are skipped.
pub fn parse_reflection_response(response: &str) -> ReflectionResponse {
    if let Some(parsed) = parse_json_reflection(response) {
        return parsed;
    }

    let mut section = Section::Preamble;
    let mut preamble: Vec<&str> = Vec::new();
    let mut final_lines: Vec<&str> = Vec::new();
    let mut removed: Vec<String> = Vec::new();
    let mut summary: Vec<&str> = Vec::new();
    let mut saw_final = false;

    for line in response.lines() {
        let (current, content) = match match_header(line) {
            Some((header, rest)) => {
                section = header;
                saw_final |= header == Section::FinalDraft;
                if rest.is_empty() {
                    continue;
                }
                (header, rest)
            }
            None => (section, line),
        };

        match current {
            Section::Preamble => preamble.push(content),
            Section::FinalDraft => final_lines.push(content),
            Section::RemovedClaims => {
                let item = strip_list_marker(content).unwrap_or(content.trim());
                let item = clean_item(item);
                if !item.is_empty() && !is_placeholder(&item) {
                    removed.push(item);
                }
            }
            Section::ChangesSummary => summary.push(content),
        }
    }

    let final_text = if saw_final {
        final_lines.join("\n").trim().to_string()
    } else {
        let preamble = preamble.join("\n").trim().to_string();
        if preamble.is_empty() {
            response.trim().to_string()
        } else {
            preamble
        }
    };

    let summary = summary.join("\n").trim().to_string();

    ReflectionResponse {
        final_text,
        removed_claims: removed,
        changes_summary: (!summary.is_empty()).then_some(summary),
    }
}

fn parse_json_reflection(response: &str) -> Option<ReflectionResponse> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end <= start {
        return None;
    }
    let mut parsed: ReflectionResponse = serde_json::from_str(&response[start..=end]).ok()?;
    parsed.final_text = parsed.final_text.trim().to_string();
    parsed.removed_claims.retain(|c| !c.trim().is_empty());
    Some(parsed)
}

fn match_header(line: &str) -> Option<(Section, &str)> {
    let cleaned = line.trim().trim_start_matches(['#', '*', ' ']);
    for (name, section) in SECTION_HEADERS {
        let Some(prefix) = cleaned.get(..name.len()) else {
            continue;
        };
        if !prefix.eq_ignore_ascii_case(name) {
            continue;
        }
        let rest = &cleaned[name.len()..];
        if !(rest.is_empty() || rest.starts_with([':', '*', ' ', '\t', '#'])) {
            continue;
        }
        let rest = rest.trim_start_matches(['*', ':', '#', ' ', '\t']).trim_end();
        let rest = rest.trim_end_matches(['*', '#']).trim_end();
        return Some((section, rest));
    }
    None
}

fn is_placeholder(item: &str) -> bool {
    let lower = item
        .trim_matches(|c: char| c == '(' || c == ')' || c == '.')
        .to_ascii_lowercase();
    matches!(lower.as_str(), "none" | "n/a" | "nothing" | "no claims removed")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_query_list Tests ====================

    #[test]
    fn test_numbered_list() {
        let reply = "1. Effects of AI on radiology\n2) AI diagnostics regulation\n3. AI in drug discovery";
        assert_eq!(
            parse_query_list(reply),
            vec![
                "Effects of AI on radiology",
                "AI diagnostics regulation",
                "AI in drug discovery"
            ]
        );
    }

    #[test]
    fn test_bulleted_list_with_commentary() {
        let reply = "Sure! Here are the queries:\n\n- \"first focused query\"\n* **second focused query**\n• third focused query\n\nGood luck.";
        assert_eq!(
            parse_query_list(reply),
            vec!["first focused query", "second focused query", "third focused query"]
        );
    }

    #[test]
    fn test_json_array_in_code_block() {
        let reply = "```json\n[\"query one\", \"query two\"]\n```";
        assert_eq!(parse_query_list(reply), vec!["query one", "query two"]);
    }

    #[test]
    fn test_malformed_json_falls_back_to_lines() {
        let reply = "[\"unterminated\n1. real query here";
        assert_eq!(parse_query_list(reply), vec!["real query here"]);
    }

    #[test]
    fn test_short_and_duplicate_items_dropped() {
        let reply = "1. AI\n2. Rust ownership\n3. rust OWNERSHIP\n4. \n5. Borrow checker";
        assert_eq!(
            parse_query_list(reply),
            vec!["Rust ownership", "Borrow checker"]
        );
    }

    #[test]
    fn test_unstructured_reply_is_empty() {
        assert!(parse_query_list("").is_empty());
        assert!(parse_query_list("I would search for many things.").is_empty());
        // bold text and version numbers are not list markers
        assert!(parse_query_list("**Queries**\n2024.1 release").is_empty());
    }

    // ==================== parse_reflection_response Tests ====================

    #[test]
    fn test_sectioned_reflection() {
        let reply = "FINAL DRAFT:\n# Title\nRust is safe [Source 1].\n\nREMOVED CLAIMS:\n- Rust is the fastest language.\n- Everyone uses Rust.\nCHANGES SUMMARY:\nRemoved two unsupported claims.";
        let parsed = parse_reflection_response(reply);
        assert_eq!(parsed.final_text, "# Title\nRust is safe [Source 1].");
        assert_eq!(
            parsed.removed_claims,
            vec!["Rust is the fastest language.", "Everyone uses Rust."]
        );
        assert_eq!(
            parsed.changes_summary.as_deref(),
            Some("Removed two unsupported claims.")
        );
    }

    #[test]
    fn test_decorated_headers_and_inline_content() {
        let reply = "## **Final Draft**\nBody text [Source 2].\n**Removed claims:** None\n### Changes summary: Tightened wording.";
        let parsed = parse_reflection_response(reply);
        assert_eq!(parsed.final_text, "Body text [Source 2].");
        assert!(parsed.removed_claims.is_empty());
        assert_eq!(parsed.changes_summary.as_deref(), Some("Tightened wording."));
    }

    #[test]
    fn test_markdown_heading_inside_draft_is_not_a_section() {
        let reply = "FINAL DRAFT:\n## Final drafting practices\nText [Source 1].";
        let parsed = parse_reflection_response(reply);
        assert_eq!(
            parsed.final_text,
            "## Final drafting practices\nText [Source 1]."
        );
    }

    #[test]
    fn test_json_reflection() {
        let reply = r#"{"final_text": " Clean text [Source 1]. ", "removed_claims": ["Bad claim.", " "], "changes_summary": "Removed one."}"#;
        let parsed = parse_reflection_response(reply);
        assert_eq!(parsed.final_text, "Clean text [Source 1].");
        assert_eq!(parsed.removed_claims, vec!["Bad claim."]);
        assert_eq!(parsed.changes_summary.as_deref(), Some("Removed one."));
    }

    #[test]
    fn test_unstructured_reply_is_final_text() {
        let reply = "  Just an improved draft [Source 1].  ";
        let parsed = parse_reflection_response(reply);
        assert_eq!(parsed.final_text, "Just an improved draft [Source 1].");
        assert!(parsed.removed_claims.is_empty());
        assert!(parsed.changes_summary.is_none());
    }

    #[test]
    fn test_preamble_used_when_final_header_missing() {
        let reply = "Improved text [Source 1].\nREMOVED CLAIMS:\n1. Dropped claim.";
        let parsed = parse_reflection_response(reply);
        assert_eq!(parsed.final_text, "Improved text [Source 1].");
        assert_eq!(parsed.removed_claims, vec!["Dropped claim."]);
    }
}
