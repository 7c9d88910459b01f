//! Question phrasing tables.
//!
//! One table for fields that are still empty, one for fields that need more
//! depth. Improvement phrasings quote the current value through `{value}`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const MAX_QUOTED_CHARS: usize = 160;

static MISSING_FIELD_QUESTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("projectTitle", "¿Cómo se llama este proyecto o campaña?"),
        (
            "briefSummary",
            "¿Puedes resumir en dos o tres frases de qué trata este brief y qué se espera lograr?",
        ),
        (
            "businessChallenge",
            "¿Cuál es el principal desafío de negocio que esta campaña debe resolver?",
        ),
        (
            "problemStatement",
            "¿Cuál es el problema concreto que enfrenta la audiencia y que la marca puede resolver?",
        ),
        (
            "strategicObjectives",
            "¿Cuáles son los objetivos estratégicos de la campaña? Idealmente con metas medibles (por ejemplo, +15% en ventas).",
        ),
        (
            "targetAudience.primary",
            "¿Quién es la audiencia principal? Describe su perfil demográfico y sus hábitos.",
        ),
        (
            "targetAudience.secondary",
            "¿Existe una audiencia secundaria a la que también debamos hablarle?",
        ),
        (
            "targetAudience.insights",
            "¿Qué insights conoces de la audiencia? Motivaciones, frenos o comportamientos relevantes.",
        ),
        (
            "brandPositioning",
            "¿Cómo quiere posicionarse la marca frente a la competencia?",
        ),
        (
            "creativeStrategy.bigIdea",
            "¿Hay una gran idea creativa o concepto central que guíe la campaña?",
        ),
        (
            "creativeStrategy.messageHierarchy",
            "¿Cuáles son los mensajes clave, en orden de importancia?",
        ),
        (
            "creativeStrategy.toneAndManner",
            "¿Qué tono y estilo debe tener la comunicación?",
        ),
        (
            "creativeStrategy.creativeMandatories",
            "¿Hay elementos obligatorios que deban aparecer en las piezas (logo, legales, claims)?",
        ),
        (
            "channelStrategy.recommendedMix",
            "¿Qué canales y medios se van a utilizar (digital, redes sociales, TV, radio, exterior, punto de venta)?",
        ),
        (
            "channelStrategy.integratedApproach",
            "¿Cómo se van a integrar los distintos canales para contar una historia coherente?",
        ),
        (
            "successMetrics.primary",
            "¿Qué métricas principales definirán el éxito de la campaña y con qué metas?",
        ),
        (
            "successMetrics.secondary",
            "¿Hay métricas secundarias que también quieras seguir?",
        ),
        (
            "successMetrics.measurementFramework",
            "¿Cómo y con qué frecuencia se medirán los resultados?",
        ),
        (
            "budgetConsiderations.estimatedRange",
            "¿Cuál es el rango de presupuesto estimado para esta campaña?",
        ),
        (
            "budgetConsiderations.keyInvestments",
            "¿En qué partidas se concentrará la mayor parte de la inversión?",
        ),
        (
            "budgetConsiderations.costOptimization",
            "¿Hay oportunidades para optimizar costos que debamos considerar?",
        ),
        (
            "riskAssessment.risks",
            "¿Qué riesgos ves para la campaña (competencia, plazos, regulación, reputación)?",
        ),
        (
            "riskAssessment.mitigationStrategies",
            "¿Cómo se mitigarían esos riesgos si llegan a ocurrir?",
        ),
        (
            "implementationRoadmap.phases",
            "¿Cuáles son las fases de implementación y sus fechas aproximadas?",
        ),
        (
            "nextSteps",
            "¿Cuáles son los próximos pasos acordados después de la reunión?",
        ),
        (
            "appendix.assumptions",
            "¿Qué supuestos estamos asumiendo al construir este brief?",
        ),
        (
            "appendix.references",
            "¿Hay referencias, estudios o campañas previas que debamos tener en cuenta?",
        ),
    ])
});

static IMPROVE_FIELD_QUESTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "projectTitle",
            "El título actual es \"{value}\". ¿Quieres un nombre más descriptivo para el proyecto?",
        ),
        (
            "briefSummary",
            "El resumen actual es: \"{value}\". ¿Puedes ampliarlo con el contexto, el alcance y el resultado esperado?",
        ),
        (
            "businessChallenge",
            "Tenemos este desafío: \"{value}\". ¿Puedes detallar su impacto en el negocio y por qué es urgente?",
        ),
        (
            "problemStatement",
            "El problema está planteado como: \"{value}\". ¿Puedes precisar a quién afecta y cómo lo vive?",
        ),
        (
            "strategicObjectives",
            "Los objetivos actuales son: \"{value}\". ¿Puedes hacerlos medibles, con metas numéricas y plazos?",
        ),
        (
            "targetAudience.primary",
            "La audiencia principal es: \"{value}\". ¿Puedes añadir edad, ubicación, intereses o hábitos de consumo?",
        ),
        (
            "targetAudience.insights",
            "Estos son los insights que tenemos: \"{value}\". ¿Conoces otros que expliquen por qué actúa así la audiencia?",
        ),
        (
            "brandPositioning",
            "El posicionamiento actual es: \"{value}\". ¿Qué diferencia a la marca de sus competidores?",
        ),
        (
            "creativeStrategy.bigIdea",
            "La idea creativa es: \"{value}\". ¿Puedes desarrollarla un poco más o dar un ejemplo de ejecución?",
        ),
        (
            "creativeStrategy.messageHierarchy",
            "Los mensajes clave son: \"{value}\". ¿Hay mensajes de apoyo que completen la jerarquía?",
        ),
        (
            "channelStrategy.recommendedMix",
            "El mix de canales es: \"{value}\". ¿Qué canales concretos (digital, redes, TV, radio, exterior) y con qué peso?",
        ),
        (
            "successMetrics.primary",
            "Las métricas principales son: \"{value}\". ¿Qué meta numérica corresponde a cada una?",
        ),
        (
            "budgetConsiderations.estimatedRange",
            "El presupuesto indicado es: \"{value}\". ¿Cómo se reparte entre producción y medios?",
        ),
        (
            "riskAssessment.risks",
            "Los riesgos identificados son: \"{value}\". ¿Hay otros riesgos o alguno que debamos priorizar?",
        ),
        (
            "implementationRoadmap.phases",
            "Las fases actuales son: \"{value}\". ¿Puedes añadir fechas, responsables o entregables por fase?",
        ),
        (
            "nextSteps",
            "Los próximos pasos son: \"{value}\". ¿Quién es responsable de cada uno y para cuándo?",
        ),
    ])
});

/// Question for a field that has no value yet.
pub fn missing_field_question(key: &str, label: &str) -> String {
    match MISSING_FIELD_QUESTIONS.get(key) {
        Some(text) => (*text).to_string(),
        None => format!(
            "Necesitamos información sobre {}. ¿Puedes proporcionar detalles específicos?",
            label
        ),
    }
}

/// Question for a field whose current value needs more depth.
pub fn improve_field_question(key: &str, label: &str, current: &str) -> String {
    let quoted = quote(current);
    match IMPROVE_FIELD_QUESTIONS.get(key) {
        Some(template) => template.replace("{value}", &quoted),
        None => format!(
            "La sección \"{}\" necesita más detalle. Actualmente tenemos: \"{}\". ¿Puedes ampliarla con información más específica?",
            label, quoted
        ),
    }
}

fn quote(current: &str) -> String {
    let current = current.trim();
    if current.chars().count() <= MAX_QUOTED_CHARS {
        return current.to_string();
    }
    let cut: String = current.chars().take(MAX_QUOTED_CHARS).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::brief::BRIEF_FIELDS;

    #[test]
    fn every_registered_field_has_missing_phrasing() {
        for f in BRIEF_FIELDS {
            assert!(MISSING_FIELD_QUESTIONS.contains_key(f.key), "{}", f.key);
        }
    }

    #[test]
    fn unknown_missing_field_uses_generic_template() {
        assert_eq!(
            missing_field_question("custom.field", "Campo Especial"),
            "Necesitamos información sobre Campo Especial. ¿Puedes proporcionar detalles específicos?"
        );
    }

    #[test]
    fn improve_phrasing_interpolates_current_value() {
        let text = improve_field_question("targetAudience.primary", "Audiencia Principal", "Jóvenes");
        assert!(text.contains("\"Jóvenes\""));
        assert!(!text.contains("{value}"));
    }

    #[test]
    fn improve_phrasing_falls_back_to_generic_template() {
        let text = improve_field_question("appendix.references", "Referencias", "Estudio 2023");
        assert!(text.starts_with("La sección \"Referencias\" necesita más detalle."));
        assert!(text.contains("Estudio 2023"));
    }

    #[test]
    fn long_values_are_shortened_when_quoted() {
        let long = "x".repeat(400);
        let text = improve_field_question("briefSummary", "Resumen del Brief", &long);
        assert!(text.contains('…'));
        assert!(text.chars().count() < 300);
    }
}
