//! Brief domain module.
//!
//! The brief document, its field registry, and the pure rules that
//! classify, normalize, validate and complete it.

mod classifier;
mod document;
mod enrichment;
mod field;
mod normalizer;
pub mod registry;
mod title;
mod validation;

pub use classifier::{classify, requires_external_review, Completeness, EXTERNAL_REVIEW_FIELDS};
pub use document::Brief;
pub use enrichment::complete_brief;
pub use field::{lookup, FieldKind, FieldPath, FieldValue, ARRAY_FIELDS};
pub use normalizer::{normalize, normalize_at, split_entries};
pub use registry::{FieldDescriptor, SectionDescriptor, BRIEF_FIELDS, BRIEF_SECTIONS};
pub use title::generate_brief_title;
pub use validation::{validate, BriefValidation};
