//! Payload of the external quality assessment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;

/// Quality verdict returned by the assessment model.
///
/// Missing keys default to their empty value so a partial payload still
/// parses; the score is clamped into 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    #[serde(deserialize_with = "de_score")]
    pub overall_score: Percentage,
    #[serde(default)]
    pub is_excellent: bool,
    #[serde(default)]
    pub ready_for_production: bool,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub remaining_gaps: Vec<String>,
    #[serde(default)]
    pub recommendation: String,
}

impl QualityAssessment {
    /// The assessment considers the brief fit to hand over.
    pub fn approves(&self) -> bool {
        self.is_excellent || self.ready_for_production
    }
}

fn de_score<'de, D>(deserializer: D) -> Result<Percentage, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(Percentage::from_score(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_payload() {
        let assessment: QualityAssessment = serde_json::from_value(json!({
            "overallScore": 92,
            "isExcellent": false,
            "readyForProduction": true,
            "strengths": ["Objetivos claros"],
            "remainingGaps": ["Presupuesto sin detallar"],
            "recommendation": "Detallar el presupuesto"
        }))
        .unwrap();
        assert_eq!(assessment.overall_score.value(), 92);
        assert!(assessment.approves());
        assert_eq!(assessment.remaining_gaps.len(), 1);
    }

    #[test]
    fn clamps_out_of_range_scores() {
        let assessment: QualityAssessment =
            serde_json::from_value(json!({ "overallScore": 140.6 })).unwrap();
        assert_eq!(assessment.overall_score, Percentage::HUNDRED);
        assert!(!assessment.approves());
    }

    #[test]
    fn requires_a_score() {
        let result = serde_json::from_value::<QualityAssessment>(json!({ "isExcellent": true }));
        assert!(result.is_err());
    }
}
