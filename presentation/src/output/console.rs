//! Console output formatter for research results

use colored::Colorize;
use scribe_domain::ResearchResult;

/// Formats research results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete research result
    pub fn format(result: &ResearchResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Research Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), result.topic));
        if let Some(requirements) = &result.requirements {
            output.push_str(&format!(
                "{} {}\n",
                "Requirements:".cyan().bold(),
                requirements
            ));
        }

        // Queries
        output.push_str(&Self::section_header("Search Queries"));
        for (i, query) in result.queries.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, query));
        }

        // Sources
        output.push_str(&Self::section_header("Sources"));
        for (i, source) in result.sources.iter().enumerate() {
            let used = result
                .reflection
                .source_usage
                .get(&source.url)
                .copied()
                .unwrap_or(0);
            output.push_str(&format!(
                "  {} {}\n     {} {}\n",
                format!("[Source {}]", i + 1).yellow().bold(),
                source.title,
                source.url.dimmed(),
                format!("(cited {}x, from \"{}\")", used, source.origin_query).dimmed()
            ));
        }

        output.push_str(&Self::section_header("Initial Draft"));
        output.push_str(&format!("\n{}\n", result.draft.text));

        output.push_str(&Self::section_header("Final Draft"));
        output.push_str(&format!("\n{}\n", result.reflection.final_text));

        if !result.reflection.removed_claims.is_empty() {
            output.push_str(&format!("\n{}\n", "Removed Claims:".yellow().bold()));
            for claim in &result.reflection.removed_claims {
                let marker = if result.reflection.integrity_defects.contains(claim) {
                    "!".red()
                } else {
                    "-".normal()
                };
                output.push_str(&format!("  {} {}\n", marker, claim));
            }
        }

        output.push_str(&Self::section_header("Changes Summary (For Review)"));
        output.push_str(&format!("\n{}\n", result.reflection.changes_summary));

        output.push_str(&format!("\n{}\n", Self::stats_line(result).dimmed()));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &ResearchResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final draft only (concise output)
    pub fn format_final_only(result: &ResearchResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            format!("=== Research: {} ===", result.topic).cyan().bold()
        ));
        output.push_str(&result.reflection.final_text);
        output.push_str("\n\n");
        output.push_str(&format!("{}\n", Self::stats_line(result).dimmed()));

        output
    }

    /// `"2 queries executed, 7 unique sources collected, 1 claim removed"`
    pub fn stats_line(result: &ResearchResult) -> String {
        let removed = result.reflection.removed_claims.len();
        format!(
            "{} {} executed, {} unique {} collected, {} {} removed",
            result.stats.queries_executed,
            if result.stats.queries_executed == 1 { "query" } else { "queries" },
            result.stats.sources_collected,
            if result.stats.sources_collected == 1 { "source" } else { "sources" },
            removed,
            if removed == 1 { "claim" } else { "claims" },
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
