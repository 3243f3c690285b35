//! Prompt templates for the research pipeline

use crate::core::string::truncate_str;
use crate::research::draft::Draft;
use crate::research::source::SourceSet;

/// Snippets longer than this many bytes are cut before going into a prompt.
const SNIPPET_BUDGET: usize = 1000;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for query splitting
    pub fn split_system() -> &'static str {
        "You are an expert at breaking down complex research requests into focused, searchable queries."
    }

    /// User prompt asking for `min..=max` focused queries
    pub fn split_prompt(
        topic: &str,
        requirements: Option<&str>,
        min_queries: usize,
        max_queries: usize,
        max_query_length: usize,
    ) -> String {
        let mut prompt = format!(
            r#"You are a query optimization agent. Split the research request below into focused search queries for a web search API.

Original request:
{}
"#,
            topic
        );

        if let Some(requirements) = requirements {
            prompt.push_str(&format!("\nRequirements:\n{}\n", requirements));
        }

        prompt.push_str(&format!(
            r#"
Produce between {min} and {max} queries that:
1. Each cover a different aspect or sub-topic of the request
2. Are specific and searchable, each under {len} characters
3. Together cover the whole request
4. Can be executed independently

Return ONLY a numbered list, one query per line:
1. First focused query
2. Second focused query"#,
            min = min_queries,
            max = max_queries,
            len = max_query_length,
        ));

        prompt
    }

    /// System prompt for draft writing
    pub fn draft_system() -> &'static str {
        r#"You are an expert researcher. You write well-structured research documents based only on the sources you are given.
Every factual statement you make carries a citation to one of those sources. You never cite anything else and never add speculation."#
    }

    /// User prompt for draft writing. Sources are numbered from 1 in set order.
    pub fn draft_prompt(topic: &str, requirements: Option<&str>, sources: &SourceSet) -> String {
        let mut prompt = format!(
            r#"Write a research draft on the following topic using ONLY the sources listed below.

Topic: {}
"#,
            topic
        );

        if let Some(requirements) = requirements {
            prompt.push_str(&format!("\nRequirements to consider:\n{}\n", requirements));
        }

        prompt.push_str("\nSources:\n");
        prompt.push_str(&Self::source_listing(sources));

        prompt.push_str(&format!(
            r#"
Citation rules:
- Every sentence that states a fact MUST end with a citation marker such as [Source 1] or [Source 2, Source 4]
- Valid markers are [Source 1] through [Source {n}]; never cite a source that is not listed above
- If the sources do not support a statement, leave the statement out
- When sources disagree, say so and cite both

Structure:
- A short introduction defining the topic and scope
- Sections whose headings follow what the sources emphasize, with several cited statements per finding
- A conclusion that introduces no new information
- A "Sources" section listing each cited source as "[Source N] Title - URL""#,
            n = sources.len()
        ));

        prompt
    }

    /// System prompt for reflection
    pub fn reflection_system() -> &'static str {
        r#"You are an expert editor and fact checker. You verify that every claim in a draft is supported by the source it cites, remove anything unsupported, and report exactly what you removed."#
    }

    /// User prompt for reflection
    pub fn reflection_prompt(
        topic: &str,
        requirements: Option<&str>,
        draft: &Draft,
        sources: &SourceSet,
    ) -> String {
        let mut prompt = format!(
            r#"Review the research draft below against its source list.

Topic: {}
"#,
            topic
        );

        if let Some(requirements) = requirements {
            prompt.push_str(&format!("\nRequirements:\n{}\n", requirements));
        }

        prompt.push_str("\nSources:\n");
        prompt.push_str(&Self::source_listing(sources));

        prompt.push_str(&format!("\nDraft:\n---\n{}\n---\n", draft.text));

        prompt.push_str(&format!(
            r#"
For every sentence in the draft:
1. Check that each citation marker refers to a listed source ([Source 1] through [Source {n}])
2. Check that the cited source plausibly supports the sentence
3. Delete the sentence if its citation is missing, refers to an unlisted source, or does not support it
Keep every supported sentence and its citation unchanged. Do not add new facts.

Reply in exactly this format:
FINAL DRAFT:
<the cleaned draft>
REMOVED CLAIMS:
- <each deleted sentence, verbatim, one per line, or "None">
CHANGES SUMMARY:
<a short summary of what you changed and why>"#,
            n = sources.len()
        ));

        prompt
    }

    fn source_listing(sources: &SourceSet) -> String {
        let mut listing = String::new();
        for (i, source) in sources.iter().enumerate() {
            listing.push_str(&format!(
                "\n[Source {}]\nTitle: {}\nURL: {}\nContent: {}\n",
                i + 1,
                source.title,
                source.url,
                truncate_str(source.snippet.trim(), SNIPPET_BUDGET)
            ));
        }
        listing
    }
}
