//! Domain logic - pure matching and rendering rules independent of file access

pub mod extraction;
pub mod pattern;
pub mod template;

pub use extraction::{ExtractedValues, Extraction};
pub use pattern::{LinePattern, SubstitutionPattern};
pub use template::{is_placeholder_name, Template};
