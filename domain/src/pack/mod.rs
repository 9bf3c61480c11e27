//! Text Packer: token-saving context built from raw inputs.
//!
//! - [`normalize`] / [`compact`] - whitespace cleanup and budget truncation
//! - [`pin_sections`] - re-append high-value sections lost to truncation
//! - [`extract_keywords`] - salient target keywords
//! - [`CandidatePack`] / [`TargetPack`] - the packs fed into prompts

pub mod keywords;
pub mod normalize;
pub mod packs;
pub mod sections;

pub use keywords::extract_keywords;
pub use normalize::{TRUNCATION_MARKER, TRUNCATION_RESERVE, compact, normalize};
pub use packs::{
    CandidatePack, DEFAULT_MAX_KEYWORDS, DEFAULT_TARGET_PACK_CHARS, DEFAULT_TRUTH_PACK_CHARS,
    TargetPack,
};
pub use sections::{extract_section, normalize_heading, pin_sections};
