//! Research domain
//!
//! Everything a research run produces, from raw search hits to the reflected
//! final draft:
//!
//! - [`source`]: [`Source`](source::Source) and the deduplicated, ordered
//!   [`SourceSet`](source::SourceSet)
//! - [`normalize`]: the url normalization that defines source identity
//! - [`citation`]: inline citation markers and how they resolve
//! - [`draft`] / [`reflection`]: the generated draft and its validated successor
//! - [`parsing`]: tolerant parsers for free-form LLM output
//! - [`phase`] / [`result`]: pipeline stages and the final run result

pub mod citation;
pub mod draft;
pub mod normalize;
pub mod parsing;
pub mod phase;
pub mod reflection;
pub mod result;
pub mod source;
