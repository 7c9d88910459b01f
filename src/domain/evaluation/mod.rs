//! Brief completion scoring.

mod assessment;
mod completion;

pub use assessment::QualityAssessment;
pub use completion::{
    score_locally, CompletionResult, EvaluationSource, COMPLETION_THRESHOLD,
    EXTERNAL_ASSESSMENT_MIN_SCORE,
};
