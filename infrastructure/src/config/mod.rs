//! Configuration file loading for scribe
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SCRIBE_` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./scribe.toml` or `./.scribe.toml`
//! 4. Global: `$XDG_CONFIG_HOME/scribe/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileHistoryConfig, FileOpenAiConfig, FileOutputConfig,
    FileOutputFormat, FileProvidersConfig, FileResearchConfig, FileSearchConfig, FileTavilyConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
