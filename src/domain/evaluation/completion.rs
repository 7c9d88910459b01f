//! Completion result and local scoring.

use serde::Serialize;

use super::assessment::QualityAssessment;
use crate::domain::brief::{classify, Brief, Completeness, BRIEF_FIELDS};
use crate::domain::foundation::Percentage;
use crate::domain::questions::{improve_field_question, missing_field_question};

/// Score a brief must reach to count as complete.
pub const COMPLETION_THRESHOLD: u8 = 95;

/// Below this local score the external assessment is not requested.
pub const EXTERNAL_ASSESSMENT_MIN_SCORE: u8 = 60;

const MAX_NEXT_QUESTIONS: usize = 3;

/// Where a completion verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationSource {
    Local,
    External,
}

/// Derived completion state of a brief. Recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    pub is_complete: bool,
    pub completion_score: Percentage,
    /// Keys of empty fields, in declaration order.
    pub missing_fields: Vec<String>,
    /// Keys of weak fields, in declaration order.
    pub weak_fields: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_questions: Vec<String>,
    #[serde(skip)]
    pub source: EvaluationSource,
}

impl CompletionResult {
    /// Replaces the local verdict and score with an external assessment.
    ///
    /// Missing and weak field lists stay local; the assessment has no
    /// notion of field keys.
    pub fn with_assessment(self, assessment: &QualityAssessment) -> Self {
        let is_complete = assessment.overall_score.value() >= COMPLETION_THRESHOLD
            && assessment.approves();

        let mut recommendations: Vec<String> = assessment
            .remaining_gaps
            .iter()
            .map(|gap| gap.trim())
            .filter(|gap| !gap.is_empty())
            .map(str::to_string)
            .collect();
        if !assessment.recommendation.trim().is_empty() {
            recommendations.push(assessment.recommendation.trim().to_string());
        }
        if recommendations.is_empty() {
            recommendations = self.recommendations;
        }

        Self {
            is_complete,
            completion_score: assessment.overall_score,
            recommendations,
            source: EvaluationSource::External,
            ..self
        }
    }

    pub fn warrants_assessment(&self) -> bool {
        self.completion_score.value() >= EXTERNAL_ASSESSMENT_MIN_SCORE
    }
}

/// Scores `brief` from field presence alone.
///
/// The score is the share of non-empty fields over all registered fields.
/// Completion needs the threshold and no weak field at all.
pub fn score_locally(brief: &Brief) -> CompletionResult {
    let mut missing = Vec::new();
    let mut weak = Vec::new();
    let mut next_questions = Vec::new();

    for descriptor in BRIEF_FIELDS {
        let value = brief.get(descriptor.key);
        match classify(descriptor.key, value) {
            Completeness::Empty => {
                missing.push(descriptor);
                if next_questions.len() < MAX_NEXT_QUESTIONS {
                    next_questions.push(missing_field_question(descriptor.key, descriptor.label));
                }
            }
            Completeness::Weak => {
                weak.push(descriptor);
                if next_questions.len() < MAX_NEXT_QUESTIONS {
                    let current = value.map(|v| v.display()).unwrap_or_default();
                    next_questions.push(improve_field_question(
                        descriptor.key,
                        descriptor.label,
                        &current,
                    ));
                }
            }
            Completeness::Sufficient => {}
        }
    }

    let filled = BRIEF_FIELDS.len() - missing.len();
    let completion_score = Percentage::from_ratio(filled, BRIEF_FIELDS.len());
    let is_complete = completion_score.value() >= COMPLETION_THRESHOLD && weak.is_empty();

    let mut recommendations = Vec::new();
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|f| f.label).collect();
        recommendations.push(format!("Completa los campos faltantes: {}.", labels.join(", ")));
    }
    if !weak.is_empty() {
        let labels: Vec<&str> = weak.iter().map(|f| f.label).collect();
        recommendations.push(format!("Amplía con más detalle: {}.", labels.join(", ")));
    }
    if recommendations.is_empty() {
        recommendations.push("El brief está completo y listo para revisión.".to_string());
    }

    CompletionResult {
        is_complete,
        completion_score,
        missing_fields: missing.iter().map(|f| f.key.to_string()).collect(),
        weak_fields: weak.iter().map(|f| f.key.to_string()).collect(),
        recommendations,
        next_questions,
        source: EvaluationSource::Local,
    }
}
