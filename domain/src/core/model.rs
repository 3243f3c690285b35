//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// LLM models known to the pipeline (Value Object)
///
/// Any other identifier is carried as [`Model::Custom`] and passed to the
/// provider verbatim, so OpenAI-compatible endpoints with their own model
/// names keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt4o,
    Gpt4oMini,
    Gpt41,
    Gpt41Mini,
    Gpt5,
    Gpt5Mini,
    O3Mini,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Gpt5 => "gpt-5",
            Model::Gpt5Mini => "gpt-5-mini",
            Model::O3Mini => "o3-mini",
            Model::Custom(s) => s,
        }
    }

    /// Reasoning models reject a custom `temperature`.
    pub fn is_reasoning(&self) -> bool {
        let name = self.as_str();
        name.starts_with("o1") || name.starts_with("o3") || name.starts_with("o4")
    }
}

impl Default for Model {
    /// Returns the default model (gpt-4o)
    fn default() -> Self {
        Model::Gpt4o
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "gpt-4o" => Model::Gpt4o,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4.1" => Model::Gpt41,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            "gpt-5" => Model::Gpt5,
            "gpt-5-mini" => Model::Gpt5Mini,
            "o3-mini" => Model::O3Mini,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.parse() {
            Ok(model) => Ok(model),
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in [Model::Gpt4o, Model::Gpt41Mini, Model::O3Mini] {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "llama-3.1-70b".parse().unwrap();
        assert_eq!(model, Model::Custom("llama-3.1-70b".to_string()));
        assert_eq!(model.to_string(), "llama-3.1-70b");
    }

    #[test]
    fn test_reasoning_detection() {
        assert!(Model::O3Mini.is_reasoning());
        assert!(Model::Custom("o1-preview".to_string()).is_reasoning());
        assert!(!Model::Gpt4o.is_reasoning());
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default(), Model::Gpt4o);
    }

    #[test]
    fn test_model_serde_as_string() {
        let json = serde_json::to_string(&Model::Gpt4oMini).unwrap();
        assert_eq!(json, "\"gpt-4o-mini\"");
        let model: Model = serde_json::from_str("\"gpt-4.1\"").unwrap();
        assert_eq!(model, Model::Gpt41);
    }
}
