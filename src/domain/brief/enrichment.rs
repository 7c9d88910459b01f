//! Local brief completion.
//!
//! Fills empty fields from content the brief already carries. Used after
//! generation so a sparse model answer still reads as a coherent draft.
//! Filled fields are never overwritten.

use super::document::Brief;
use super::field::{FieldPath, FieldValue};
use super::registry;

const DEFAULT_CHALLENGE: &str = "los desafíos identificados en la reunión";

const DEFAULT_NEXT_STEPS: &[&str] = &[
    "Validar el brief con el equipo del cliente",
    "Definir presupuesto y calendario de producción",
    "Presentar rutas creativas para aprobación",
];

/// Returns a copy of `brief` with derivable empty fields filled in.
pub fn complete_brief(brief: &Brief) -> Brief {
    let mut next = brief.clone();

    let audience = entry(brief, "targetAudience.primary");
    let challenge = entry(brief, "businessChallenge");

    if is_blank(&next, "problemStatement") {
        if let Some(audience) = &audience {
            let need = challenge.as_deref().unwrap_or(DEFAULT_CHALLENGE);
            next = fill(
                &next,
                "problemStatement",
                FieldValue::text(format!(
                    "{} necesita una solución que responda a: {}",
                    audience, need
                )),
            );
        }
    }

    if is_blank(&next, "briefSummary") {
        let title = brief.title();
        if !title.is_empty() {
            let summary = match &challenge {
                Some(challenge) => format!("{}: {}", title, challenge),
                None => format!("{}: brief de marketing pendiente de detallar.", title),
            };
            next = fill(&next, "briefSummary", FieldValue::text(summary));
        }
    }

    if is_blank(&next, "nextSteps") {
        next = fill(&next, "nextSteps", FieldValue::list(DEFAULT_NEXT_STEPS.iter().copied()));
    }

    next
}

fn entry(brief: &Brief, key: &str) -> Option<String> {
    brief
        .get(key)
        .and_then(FieldValue::first_entry)
        .map(str::to_string)
}

fn is_blank(brief: &Brief, key: &str) -> bool {
    brief.get(key).map_or(true, FieldValue::is_blank)
}

fn fill(brief: &Brief, key: &'static str, value: FieldValue) -> Brief {
    debug_assert!(registry::field(key).is_some());
    brief.set(&FieldPath::from_static(key), value)
}
