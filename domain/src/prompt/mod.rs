//! Prompt domain
//!
//! Pure functions that turn structured inputs into the prompts sent at each
//! stage of a research run.

mod template;

pub use template::PromptTemplate;
