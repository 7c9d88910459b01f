//! Prompt texts for the brief capabilities.

use serde_json::{json, Map, Value};

use crate::domain::brief::{FieldKind, FieldPath, ARRAY_FIELDS, BRIEF_FIELDS};

pub const GENERATION_SYSTEM_PROMPT: &str = "\
Eres un estratega de marketing senior. A partir de la transcripción de una reunión \
redactas briefs de marketing completos y accionables en español.

Reglas:
- Devuelve únicamente un objeto JSON con la estructura indicada.
- No analices ni califiques la reunión: crea el brief.
- Usa solo información presente en la transcripción; deja vacío lo que no se mencione.
- Los campos indicados como lista deben ser arreglos de textos.";

pub const UPDATE_SYSTEM_PROMPT: &str = "\
Eres un asistente que mantiene actualizado un brief de marketing. Recibes el brief \
completo, el campo a actualizar y la respuesta del usuario.

Reglas:
- Integra la respuesta en el campo indicado sin perder información existente relevante.
- No modifiques otros campos.
- Devuelve el brief completo en \"updatedBrief\" y una confirmación breve y amable en \"message\".
- Devuelve únicamente JSON.";

pub const ASSESSMENT_SYSTEM_PROMPT: &str = "\
Eres un director de estrategia que evalúa la calidad de briefs de marketing. \
Evalúa claridad, coherencia, objetivos medibles, audiencia definida y viabilidad. \
Devuelve únicamente JSON.";

/// Skeleton of the brief with every field set to its label.
pub fn brief_schema() -> Value {
    let mut root = Map::new();
    for descriptor in BRIEF_FIELDS {
        let placeholder = match descriptor.kind() {
            FieldKind::List => json!([descriptor.label]),
            FieldKind::Text => json!(descriptor.label),
        };
        match descriptor.key.split_once('.') {
            Some((parent, child)) => {
                let entry = root.entry(parent.to_string()).or_insert_with(|| json!({}));
                if let Value::Object(children) = entry {
                    children.insert(child.to_string(), placeholder);
                }
            }
            None => {
                root.insert(descriptor.key.to_string(), placeholder);
            }
        }
    }
    Value::Object(root)
}

pub fn generation_user_prompt(transcription: &str) -> String {
    format!(
        "Crea un brief de marketing a partir de esta transcripción.\n\n\
         Estructura esperada (cada valor describe el contenido del campo):\n{}\n\n\
         Campos que deben ser listas: {}.\n\n\
         Transcripción:\n\"\"\"\n{}\n\"\"\"",
        pretty(&brief_schema()),
        ARRAY_FIELDS.join(", "),
        transcription.trim()
    )
}

pub fn update_user_prompt(brief: &Value, field: &FieldPath, label: &str, answer: &str) -> String {
    let shape = match field.kind() {
        FieldKind::List => "una lista (arreglo de textos)",
        FieldKind::Text => "un texto",
    };
    format!(
        "Brief actual:\n{}\n\n\
         Campo a actualizar: {} ({}). Debe ser {}.\n\
         Respuesta del usuario:\n\"\"\"\n{}\n\"\"\"\n\n\
         Campos que siempre deben ser listas: {}.\n\n\
         Responde con: {{\"updatedBrief\": {{...}}, \"message\": \"...\"}}",
        pretty(brief),
        field,
        label,
        shape,
        answer.trim(),
        ARRAY_FIELDS.join(", ")
    )
}

pub fn assessment_user_prompt(brief: &Value) -> String {
    format!(
        "Evalúa este brief:\n{}\n\n\
         Responde con:\n\
         {{\"overallScore\": 0-100, \"isExcellent\": bool, \"readyForProduction\": bool, \
         \"strengths\": [\"...\"], \"remainingGaps\": [\"...\"], \"recommendation\": \"...\"}}",
        pretty(brief)
    )
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_nests_sections_and_marks_lists() {
        let schema = brief_schema();
        assert_eq!(schema["projectTitle"], "Título del Proyecto");
        assert!(schema["strategicObjectives"].is_array());
        assert!(schema["targetAudience"]["insights"].is_array());
        assert!(schema["targetAudience"]["primary"].is_string());
    }

    #[test]
    fn generation_prompt_embeds_transcription() {
        let prompt = generation_user_prompt("  Reunión con el cliente  ");
        assert!(prompt.contains("\"\"\"\nReunión con el cliente\n\"\"\""));
        assert!(prompt.contains("strategicObjectives"));
    }

    #[test]
    fn update_prompt_states_expected_shape() {
        let field = FieldPath::new("nextSteps").unwrap();
        let prompt = update_user_prompt(&json!({}), &field, "Próximos Pasos", "Llamar al cliente");
        assert!(prompt.contains("Campo a actualizar: nextSteps (Próximos Pasos)"));
        assert!(prompt.contains("una lista"));
    }
}
