//! Research request value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A topic to research, with optional free-form requirements (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRequest {
    topic: String,
    requirements: Option<String>,
}

impl ResearchRequest {
    /// Create a new request, rejecting empty or whitespace-only topics.
    pub fn new(topic: impl Into<String>) -> Result<Self, DomainError> {
        let topic = topic.into();
        let trimmed = topic.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRequest(
                "topic cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            topic: trimmed.to_string(),
            requirements: None,
        })
    }

    /// Attach requirements. Blank requirements are treated as absent.
    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        let requirements = requirements.into();
        let trimmed = requirements.trim();
        self.requirements = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn requirements(&self) -> Option<&str> {
        self.requirements.as_deref()
    }

    /// The text the query splitter measures and decomposes.
    pub fn full_text(&self) -> String {
        match &self.requirements {
            Some(requirements) => format!("{}\n\nRequirements: {}", self.topic, requirements),
            None => self.topic.clone(),
        }
    }
}

impl std::fmt::Display for ResearchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let request = ResearchRequest::new("  Rust adoption in embedded  ").unwrap();
        assert_eq!(request.topic(), "Rust adoption in embedded");
        assert!(request.requirements().is_none());
    }

    #[test]
    fn test_empty_topic_rejected() {
        assert!(ResearchRequest::new("").is_err());
        assert!(ResearchRequest::new("   \n").is_err());
    }

    #[test]
    fn test_blank_requirements_ignored() {
        let request = ResearchRequest::new("AI").unwrap().with_requirements("  ");
        assert!(request.requirements().is_none());
        assert_eq!(request.full_text(), "AI");
    }

    #[test]
    fn test_full_text_includes_requirements() {
        let request = ResearchRequest::new("AI in healthcare")
            .unwrap()
            .with_requirements("Focus on the last five years");
        assert_eq!(
            request.full_text(),
            "AI in healthcare\n\nRequirements: Focus on the last five years"
        );
    }
}
