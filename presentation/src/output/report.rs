//! Plain-text report written by `--output`

use scribe_domain::ResearchResult;

const RULE_WIDTH: usize = 60;

/// Render the uncolored file report: header, sources, both drafts and the
/// change summary.
pub fn format_report(result: &ResearchResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("Topic: {}\n", result.topic));
    if let Some(requirements) = &result.requirements {
        out.push_str(&format!("Requirements: {}\n", requirements));
    }
    out.push_str(&format!(
        "\nQueries Executed: {}\n",
        result.stats.queries_executed
    ));
    for query in &result.queries {
        out.push_str(&format!("  - {}\n", query));
    }
    out.push_str(&format!(
        "Sources Collected: {}\n",
        result.stats.sources_collected
    ));

    let mut section = |title: &str, body: &str| {
        out.push_str(&format!("\n{rule}\n{title}\n{rule}\n\n{}\n", body.trim_end()));
    };

    section("INITIAL DRAFT", &result.draft.text);
    section("IMPROVED DRAFT", &result.reflection.final_text);

    let removed = if result.reflection.removed_claims.is_empty() {
        "None".to_string()
    } else {
        result
            .reflection
            .removed_claims
            .iter()
            .map(|claim| format!("- {}", claim))
            .collect::<Vec<_>>()
            .join("\n")
    };
    section("REMOVED CLAIMS", &removed);
    section("CHANGES SUMMARY (FOR REVIEW)", &result.reflection.changes_summary);

    let sources = result
        .sources
        .iter()
        .enumerate()
        .map(|(i, s)| format!("[Source {}] {} - {}", i + 1, s.title, s.url))
        .collect::<Vec<_>>()
        .join("\n");
    section("SOURCES", &sources);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::console::tests::sample_result;

    #[test]
    fn test_report_layout() {
        let report = format_report(&sample_result());

        assert!(report.starts_with("Topic: Rust ownership\nRequirements: Beginner level\n"));
        assert!(report.contains("Queries Executed: 1\n  - rust ownership\nSources Collected: 2\n"));
        assert!(report.contains("INITIAL DRAFT\n"));
        assert!(report.contains("IMPROVED DRAFT\n"));
        assert!(report.contains("- Rust runs on Mars [http://unknown.com]."));
        assert!(report.contains("[Source 1] Rust Book - https://doc.rust-lang.org/book"));
        assert!(!report.contains('\u{1b}'));
    }
}
