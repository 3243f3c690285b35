//! Research history listing (`--history`)

use colored::Colorize;
use scribe_application::HistoryRecord;
use scribe_domain::core::string::truncate;

/// Format history records, newest first, one block per run
pub fn format_history(records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return "No research history yet.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "{} {}\n",
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed(),
            record.topic.bold()
        ));
        if let Some(requirements) = &record.requirements {
            out.push_str(&format!("  {} {}\n", "requirements:".dimmed(), truncate(requirements, 80)));
        }
        out.push_str(&format!(
            "  {} queries, {} sources, {} claims removed\n",
            record.queries_count,
            record.sources_count,
            record.removed_claims.len()
        ));
        let preview = record.improved_draft.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        out.push_str(&format!("  {}\n\n", truncate(preview.trim(), 100)));
    }
    out
}
