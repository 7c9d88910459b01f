//! Completeness classifier.
//!
//! Decides whether a field value is empty, weak or sufficient using
//! hand-authored heuristics. Every rule is a pure function of the one value
//! being classified; no rule looks at other fields.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::field::{FieldKind, FieldValue};

/// Classification outcome for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completeness {
    Empty,
    Weak,
    Sufficient,
}

impl Completeness {
    pub fn needs_question(&self) -> bool {
        !matches!(self, Completeness::Sufficient)
    }
}

/// Channel words that make a channel mix concrete.
const CHANNEL_KEYWORDS: &[&str] = &[
    "digital",
    "social",
    "redes",
    "tv",
    "televisión",
    "television",
    "radio",
    "email",
    "search",
    "display",
    "ooh",
    "exterior",
    "influencer",
    "prensa",
    "eventos",
    "video",
    "podcast",
    "retail",
    "punto de venta",
];

/// Per-field rule for telling weak from sufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heuristic {
    MinChars(usize),
    MinItems(usize),
    /// At least `min_items` entries, one of them carrying a number or `%`.
    MeasurableItems { min_items: usize },
    /// Long enough and naming at least one channel.
    ChannelMix { min_chars: usize },
    /// Non-empty values are weak until an external assessment says otherwise.
    ExternalReview,
}

/// Fields whose sufficiency heuristics cannot decide.
pub const EXTERNAL_REVIEW_FIELDS: &[&str] = &[
    "successMetrics.secondary",
    "budgetConsiderations.estimatedRange",
    "budgetConsiderations.keyInvestments",
    "budgetConsiderations.costOptimization",
    "riskAssessment.risks",
    "riskAssessment.mitigationStrategies",
    "implementationRoadmap.phases",
    "appendix.assumptions",
    "appendix.references",
];

const GENERIC_MIN_CHARS: usize = 50;
const GENERIC_MIN_ITEMS: usize = 2;

static HEURISTICS: Lazy<HashMap<&'static str, Heuristic>> = Lazy::new(|| {
    use Heuristic::*;

    let mut rules = HashMap::from([
        ("projectTitle", MinChars(5)),
        ("briefSummary", MinChars(100)),
        ("businessChallenge", MinChars(80)),
        ("problemStatement", MinChars(80)),
        ("strategicObjectives", MeasurableItems { min_items: 2 }),
        ("targetAudience.primary", MinChars(30)),
        ("targetAudience.secondary", MinChars(20)),
        ("targetAudience.insights", MinItems(2)),
        ("brandPositioning", MinChars(60)),
        ("creativeStrategy.bigIdea", MinChars(40)),
        ("creativeStrategy.messageHierarchy", MinItems(2)),
        ("creativeStrategy.toneAndManner", MinChars(20)),
        ("channelStrategy.recommendedMix", ChannelMix { min_chars: 50 }),
        ("successMetrics.primary", MeasurableItems { min_items: 2 }),
        ("nextSteps", MinItems(2)),
    ]);
    for key in EXTERNAL_REVIEW_FIELDS {
        rules.insert(*key, ExternalReview);
    }
    rules
});

/// True when only an external assessment can mark the field sufficient.
pub fn requires_external_review(key: &str) -> bool {
    EXTERNAL_REVIEW_FIELDS.contains(&key)
}

/// Classifies the value stored at `key`.
///
/// `None` (never written) and blank values are always [`Completeness::Empty`].
pub fn classify(key: &str, value: Option<&FieldValue>) -> Completeness {
    let Some(value) = value else {
        return Completeness::Empty;
    };
    if value.is_blank() {
        return Completeness::Empty;
    }

    let heuristic = HEURISTICS.get(key).copied().unwrap_or(match value.kind() {
        FieldKind::List => Heuristic::MinItems(GENERIC_MIN_ITEMS),
        FieldKind::Text => Heuristic::MinChars(GENERIC_MIN_CHARS),
    });

    if is_weak(heuristic, value) {
        Completeness::Weak
    } else {
        Completeness::Sufficient
    }
}

fn is_weak(heuristic: Heuristic, value: &FieldValue) -> bool {
    match heuristic {
        Heuristic::ExternalReview => true,
        Heuristic::MinChars(min) => char_len(value) < min,
        Heuristic::MinItems(min) => item_count(value) < min,
        Heuristic::MeasurableItems { min_items } => {
            item_count(value) < min_items || !entries(value).any(is_measurable)
        }
        Heuristic::ChannelMix { min_chars } => {
            let text = entries(value).collect::<Vec<_>>().join(" ").to_lowercase();
            char_len(value) < min_chars || !CHANNEL_KEYWORDS.iter().any(|k| text.contains(k))
        }
    }
}

/// Non-blank trimmed entries; text counts as a single entry.
fn entries(value: &FieldValue) -> Box<dyn Iterator<Item = &str> + '_> {
    match value {
        FieldValue::Text(s) => Box::new(std::iter::once(s.trim()).filter(|s| !s.is_empty())),
        FieldValue::List(items) => {
            Box::new(items.iter().map(|i| i.trim()).filter(|i| !i.is_empty()))
        }
    }
}

fn item_count(value: &FieldValue) -> usize {
    entries(value).count()
}

fn char_len(value: &FieldValue) -> usize {
    match value {
        FieldValue::Text(s) => s.trim().chars().count(),
        FieldValue::List(_) => value.display().chars().count(),
    }
}

fn is_measurable(entry: &str) -> bool {
    entry.chars().any(|c| c.is_ascii_digit() || c == '%')
}
