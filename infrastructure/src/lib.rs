//! Infrastructure layer for scribe
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod history;
pub mod providers;
pub mod search;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileHistoryConfig, FileOpenAiConfig,
    FileOutputConfig, FileOutputFormat, FileResearchConfig, FileTavilyConfig,
};
pub use history::JsonlResearchHistory;
pub use providers::OpenAiGateway;
pub use search::TavilySearchGateway;
