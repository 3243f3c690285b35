//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for research results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Queries, sources, both drafts and the change summary
    Full,
    /// Only the final draft
    Final,
    /// JSON output
    Json,
}

impl From<OutputFormat> for scribe_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => scribe_domain::OutputFormat::Full,
            OutputFormat::Final => scribe_domain::OutputFormat::Final,
            OutputFormat::Json => scribe_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for scribe
#[derive(Parser, Debug)]
#[command(name = "scribe")]
#[command(author, version, about = "Cited research drafts from an LLM and web search")]
#[command(long_about = r#"
Scribe researches a topic on the web and writes a draft that cites its sources.

The process has four phases:
1. Query Splitting: long requests are split into 2-5 focused search queries
2. Source Collection: every query is searched and results are deduplicated by URL
3. Draft Writing: the model writes a draft citing only the collected sources
4. Reflection: a second pass removes unsupported claims and unknown citations

Requires OPENAI_API_KEY and TAVILY_API_KEY (a .env file is read if present).

Configuration files are loaded from (in priority order):
1. SCRIBE_* environment variables
2. --config <path>     Explicit config file
3. ./scribe.toml       Project-level config
4. ~/.config/scribe/config.toml   Global config

Example:
  scribe --topic "Rust adoption in embedded systems"
  scribe -t "Solid-state batteries" -r "Focus on 2023-2025 commercial progress" -o report.txt
  scribe -t "CRISPR in agriculture" --format json --max-sources 8
  scribe --history 5
"#)]
pub struct Cli {
    /// Research topic
    #[arg(
        short,
        long,
        value_name = "TOPIC",
        required_unless_present_any = ["show_config", "history"]
    )]
    pub topic: Option<String>,

    /// Additional requirements for the research
    #[arg(short, long, value_name = "TEXT")]
    pub requirements: Option<String>,

    /// Maximum sources per search query [env: TAVILY_MAX_SOURCES] [default: 5]
    #[arg(long, value_name = "N")]
    pub max_sources: Option<usize>,

    /// Requests longer than this many characters are split into several queries
    #[arg(long, value_name = "CHARS")]
    pub max_query_length: Option<usize>,

    /// Also write a plain-text report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Console output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Model for every stage [env: OPENAI_MODEL]
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Timeout in seconds for each LLM and search call
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Show the N most recent research runs and exit
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "10")]
    pub history: Option<usize>,

    /// Also write logs to daily rotating files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
