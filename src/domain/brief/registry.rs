//! Field registry: the single ordered list of brief fields.
//!
//! Every other component consults these descriptors by reference; nothing
//! else in the crate spells out the set of brief fields.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use super::field::{FieldKind, FieldPath};

/// Static description of one brief field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Dotted path of the field.
    pub key: &'static str,
    /// Display label shown to the user.
    pub label: &'static str,
    /// Required fields are asked first.
    pub required: bool,
}

impl FieldDescriptor {
    const fn new(key: &'static str, label: &'static str, required: bool) -> Self {
        Self { key, label, required }
    }

    pub fn path(&self) -> FieldPath {
        FieldPath::from_static(self.key)
    }

    pub fn kind(&self) -> FieldKind {
        FieldKind::for_path(self.key)
    }

    /// Parent object name for nested fields.
    pub fn section(&self) -> Option<&'static str> {
        self.key.split_once('.').map(|(parent, _)| parent)
    }
}

/// Label for a nested parent object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionDescriptor {
    pub key: &'static str,
    pub label: &'static str,
}

/// All brief fields in declaration order.
pub static BRIEF_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("projectTitle", "Título del Proyecto", true),
    FieldDescriptor::new("briefSummary", "Resumen del Brief", true),
    FieldDescriptor::new("businessChallenge", "Desafío de Negocio", true),
    FieldDescriptor::new("problemStatement", "Planteamiento del Problema", true),
    FieldDescriptor::new("strategicObjectives", "Objetivos Estratégicos", true),
    FieldDescriptor::new("targetAudience.primary", "Audiencia Principal", true),
    FieldDescriptor::new("targetAudience.secondary", "Audiencia Secundaria", false),
    FieldDescriptor::new("targetAudience.insights", "Insights de la Audiencia", true),
    FieldDescriptor::new("brandPositioning", "Posicionamiento de Marca", true),
    FieldDescriptor::new("creativeStrategy.bigIdea", "Gran Idea Creativa", true),
    FieldDescriptor::new("creativeStrategy.messageHierarchy", "Jerarquía de Mensajes", true),
    FieldDescriptor::new("creativeStrategy.toneAndManner", "Tono y Estilo", false),
    FieldDescriptor::new(
        "creativeStrategy.creativeMandatories",
        "Elementos Creativos Obligatorios",
        false,
    ),
    FieldDescriptor::new("channelStrategy.recommendedMix", "Mix de Canales Recomendado", true),
    FieldDescriptor::new("channelStrategy.integratedApproach", "Enfoque Integrado", false),
    FieldDescriptor::new("successMetrics.primary", "Métricas Principales", true),
    FieldDescriptor::new("successMetrics.secondary", "Métricas Secundarias", false),
    FieldDescriptor::new("successMetrics.measurementFramework", "Marco de Medición", false),
    FieldDescriptor::new("budgetConsiderations.estimatedRange", "Rango de Presupuesto", false),
    FieldDescriptor::new("budgetConsiderations.keyInvestments", "Inversiones Clave", false),
    FieldDescriptor::new("budgetConsiderations.costOptimization", "Optimización de Costos", false),
    FieldDescriptor::new("riskAssessment.risks", "Riesgos Identificados", false),
    FieldDescriptor::new(
        "riskAssessment.mitigationStrategies",
        "Estrategias de Mitigación",
        false,
    ),
    FieldDescriptor::new("implementationRoadmap.phases", "Fases de Implementación", false),
    FieldDescriptor::new("nextSteps", "Próximos Pasos", false),
    FieldDescriptor::new("appendix.assumptions", "Supuestos", false),
    FieldDescriptor::new("appendix.references", "Referencias", false),
];

/// Parent objects of nested fields.
pub static BRIEF_SECTIONS: &[SectionDescriptor] = &[
    SectionDescriptor { key: "targetAudience", label: "Audiencia Objetivo" },
    SectionDescriptor { key: "creativeStrategy", label: "Estrategia Creativa" },
    SectionDescriptor { key: "channelStrategy", label: "Estrategia de Canales" },
    SectionDescriptor { key: "successMetrics", label: "Métricas de Éxito" },
    SectionDescriptor { key: "budgetConsiderations", label: "Consideraciones de Presupuesto" },
    SectionDescriptor { key: "riskAssessment", label: "Evaluación de Riesgos" },
    SectionDescriptor { key: "implementationRoadmap", label: "Hoja de Ruta" },
    SectionDescriptor { key: "appendix", label: "Anexo" },
];

static FIELD_INDEX: Lazy<HashMap<&'static str, &'static FieldDescriptor>> =
    Lazy::new(|| BRIEF_FIELDS.iter().map(|f| (f.key, f)).collect());

/// Looks up a field descriptor by dotted key.
pub fn field(key: &str) -> Option<&'static FieldDescriptor> {
    FIELD_INDEX.get(key).copied()
}

/// Looks up a section descriptor by parent key.
pub fn section(key: &str) -> Option<&'static SectionDescriptor> {
    BRIEF_SECTIONS.iter().find(|s| s.key == key)
}

/// Fields nested under `section`, in declaration order.
pub fn fields_in_section(section: &str) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
    BRIEF_FIELDS.iter().filter(move |f| f.section() == Some(section))
}

/// Display label for any key; unknown keys are shown as-is.
pub fn label_for(key: &str) -> &str {
    field(key)
        .map(|f| f.label)
        .or_else(|| section(key).map(|s| s.label))
        .unwrap_or(key)
}
