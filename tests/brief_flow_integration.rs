//! End-to-end tests of the brief flow against mock providers.
//!
//! 1. A transcription is turned into a brief (or a placeholder)
//! 2. The chat asks questions and merges answers, by model or locally
//! 3. Completion is evaluated, with or without an external assessment

use serde_json::json;
use std::sync::Arc;

use brief_assistant::adapters::ai::{FailoverAIProvider, MockAIProvider, MockError};
use brief_assistant::adapters::llm::{LlmBriefGenerator, LlmBriefUpdater, LlmQualityAssessor};
use brief_assistant::application::{
    AnswerMerger, BriefChatHandler, CompletionEvaluator, GenerateBriefCommand,
    GenerateBriefHandler, MergeSource, QualityMonitor,
};
use brief_assistant::domain::brief::{
    complete_brief, generate_brief_title, normalize, validate, FieldKind, FieldValue, BRIEF_FIELDS,
};
use brief_assistant::domain::conversation::SessionPhase;
use brief_assistant::ports::AIProvider;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn chain(mocks: &[MockAIProvider]) -> Arc<dyn AIProvider> {
    let providers: Vec<Arc<dyn AIProvider>> = mocks
        .iter()
        .cloned()
        .map(|m| Arc::new(m) as Arc<dyn AIProvider>)
        .collect();
    Arc::new(FailoverAIProvider::new(providers))
}

fn generated_brief() -> String {
    json!({
        "projectTitle": "Lanzamiento App Finanzas",
        "briefSummary": "Lanzar una app de finanzas personales para jóvenes profesionales",
        "businessChallenge": "Baja adopción de herramientas de ahorro",
        "strategicObjectives": "Conseguir 50.000 descargas; Retener 40% a 90 días",
        "targetAudience": { "primary": "Jóvenes profesionales de 25 a 35 años" },
        "creativeStrategy": { "messageHierarchy": { "a": "Ahorra sin pensar", "b": "Control total" } }
    })
    .to_string()
}

// =============================================================================
// Brief rules
// =============================================================================

#[test]
fn empty_target_audience_is_flagged() {
    let warning = "Se recomienda agregar: Audiencia Objetivo".to_string();

    let without = validate(&normalize(&json!({ "targetAudience": {} })));
    assert!(without.warnings.contains(&warning));

    let with = validate(&normalize(&json!({ "targetAudience": { "primary": "X" } })));
    assert!(!with.warnings.contains(&warning));
}

#[test]
fn explicit_title_wins() {
    assert_eq!(
        generate_brief_title(&json!({ "projectTitle": "Amazing Campaign" })),
        "Amazing Campaign"
    );
}

#[test]
fn problem_statement_is_derived_from_audience() {
    let brief = normalize(&json!({ "targetAudience": { "primary": "Small business owners" } }));
    let completed = complete_brief(&brief);
    let problem = completed.get("problemStatement").unwrap().display();
    assert!(problem.contains("Small business owners necesita una solución"));
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn non_json_generation_yields_error_placeholder() {
    let provider = chain(&[MockAIProvider::new().with_response("not a json")]);
    let handler = GenerateBriefHandler::new(Arc::new(LlmBriefGenerator::new(provider)));

    let result = handler
        .handle(GenerateBriefCommand::new("Reunión de kickoff con el cliente"))
        .await
        .unwrap();

    assert!(result.is_placeholder);
    let summary = result.brief.get("briefSummary").unwrap().display();
    assert!(result.brief.title().contains("Error") || summary.contains("Error"));
}

#[tokio::test]
async fn generation_coerces_model_shapes() {
    let provider = chain(&[MockAIProvider::new().with_response(generated_brief())]);
    let handler = GenerateBriefHandler::new(Arc::new(LlmBriefGenerator::new(provider)));

    let brief = handler
        .handle(GenerateBriefCommand::new("Reunión"))
        .await
        .unwrap()
        .brief;

    assert_eq!(
        brief.get("strategicObjectives"),
        Some(&FieldValue::list(["Conseguir 50.000 descargas", "Retener 40% a 90 días"]))
    );
    assert_eq!(
        brief.get("creativeStrategy.messageHierarchy"),
        Some(&FieldValue::list(["Ahorra sin pensar", "Control total"]))
    );
}

// =============================================================================
// Quality monitor
// =============================================================================

#[tokio::test]
async fn rejected_assessment_leaves_no_quality_and_an_error() {
    let provider = chain(&[MockAIProvider::new().with_error(MockError::Network {
        message: "connection refused".into(),
    })]);
    let monitor = QualityMonitor::new(Arc::new(LlmQualityAssessor::new(provider)));

    monitor.refresh(&normalize(&json!({}))).await;

    let state = monitor.state();
    assert!(state.brief_quality.is_none());
    assert!(state.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert!(!state.loading);
}

// =============================================================================
// Chat flow
// =============================================================================

#[tokio::test]
async fn model_merges_always_respect_field_kinds() {
    // The model answers with the wrong shapes on purpose.
    let reply = json!({
        "updatedBrief": {
            "projectTitle": ["Lanzamiento", "App"],
            "briefSummary": { "texto": "Resumen" },
            "nextSteps": "Diseñar; Probar; Lanzar",
            "strategicObjectives": 42,
            "targetAudience": "Jóvenes"
        },
        "message": "Hecho."
    });
    let provider = chain(&[MockAIProvider::new().with_response(reply.to_string())]);
    let merger = AnswerMerger::new(Arc::new(LlmBriefUpdater::new(provider)));
    let brief = normalize(&json!({}));

    let outcome = merger
        .merge(&brief, &BRIEF_FIELDS[0].path(), "Lanzamiento App")
        .await;

    assert_eq!(outcome.source, MergeSource::Model);
    for descriptor in BRIEF_FIELDS {
        let kind = outcome.brief.get(descriptor.key).map(FieldValue::kind);
        assert_eq!(kind, Some(descriptor.kind()), "{}", descriptor.key);
    }
    assert_eq!(
        outcome.brief.get("nextSteps").and_then(FieldValue::as_list).map(<[String]>::len),
        Some(3)
    );
}

#[tokio::test]
async fn chat_completes_when_model_output_is_unusable() {
    // An empty mock answers plain text, which no capability can parse.
    let provider = chain(&[MockAIProvider::new()]);
    let chat = BriefChatHandler::new(
        AnswerMerger::new(Arc::new(LlmBriefUpdater::new(provider.clone()))),
        CompletionEvaluator::new(Arc::new(LlmQualityAssessor::new(provider))),
    );

    let brief = normalize(&serde_json::from_str::<serde_json::Value>(&generated_brief()).unwrap());
    chat.start(&brief).await.unwrap().expect("questions pending");

    let mut finished = None;
    for _ in 0..(BRIEF_FIELDS.len() * 2) {
        let question = chat.session().current_question().cloned().unwrap();
        let answer = match question.field.kind() {
            FieldKind::List => "Primer punto con 10% de mejora, Segundo punto con 20% de mejora",
            FieldKind::Text => "Respuesta completa con detalle suficiente sobre digital, redes sociales y eventos para el campo",
        };
        let turn = chat.send_message(answer).await.unwrap();
        if let Some(completion) = turn.completion {
            finished = Some(completion);
            break;
        }
    }

    let completion = finished.expect("chat should finish");
    let session = chat.session();
    assert_eq!(session.phase(), SessionPhase::Completed);
    assert!(completion.completion_score.value() >= 60);
    assert!(!session.scheduler().completed_ids().is_empty());
}
