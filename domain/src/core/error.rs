//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid research request: {0}")]
    InvalidRequest(String),

    #[error("Invalid research parameters: {0}")]
    InvalidParams(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_display() {
        let error = DomainError::InvalidRequest("topic cannot be empty".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid research request: topic cannot be empty"
        );
    }

    #[test]
    fn test_invalid_params_display() {
        let error = DomainError::InvalidParams("max_sources_per_query must be > 0".to_string());
        assert!(error.to_string().starts_with("Invalid research parameters"));
    }
}
