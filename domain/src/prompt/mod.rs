//! Prompt templates
//!
//! Wording is free to change; the strict `FINAL RANKING` ending that the
//! ranking parser relies on is not.

pub mod template;

pub use template::{DEFAULT_STYLE_GUIDE, PromptContext, PromptTemplate, STRICT_RANKING_SUFFIX};
