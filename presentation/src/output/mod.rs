//! Output formatting for research results

pub mod console;
pub mod history;
pub mod report;
