//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for research results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Queries, sources, initial draft, final draft and changes
    Full,
    /// Only the final draft (default)
    #[default]
    Final,
    /// JSON output
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "final" => Ok(Self::Final),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}
