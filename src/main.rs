//! Brief assistant CLI.
//!
//! Usage:
//!   brief-assistant <transcription-file>
//!
//! Generates a marketing brief from the transcription, then asks the
//! questions needed to complete it on stdin/stdout. The final brief is
//! printed as JSON.

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use brief_assistant::adapters::ai::build_provider_chain;
use brief_assistant::adapters::llm::{LlmBriefGenerator, LlmBriefUpdater, LlmQualityAssessor};
use brief_assistant::application::{
    AnswerMerger, BriefChatHandler, ChatError, CompletionEvaluator, GenerateBriefCommand,
    GenerateBriefHandler,
};
use brief_assistant::config::{AppConfig, LoggingConfig};
use brief_assistant::domain::conversation::{BriefSession, Role};
use brief_assistant::ports::{AIError, AIProvider};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {}", err);
        return ExitCode::FAILURE;
    }
    init_tracing(&config.logging);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: brief-assistant <transcription-file>");
        return ExitCode::from(2);
    };

    match run(&config, &path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

async fn run(config: &AppConfig, path: &str) -> Result<(), BoxError> {
    let transcription = tokio::fs::read_to_string(path).await?;

    let provider: Option<Arc<dyn AIProvider>> = match build_provider_chain(&config.ai) {
        Ok(chain) => Some(Arc::new(chain)),
        Err(AIError::NotConfigured) => {
            warn!("no AI provider configured");
            None
        }
        Err(err) => return Err(err.into()),
    };

    let generator = match &provider {
        Some(provider) => GenerateBriefHandler::new(Arc::new(LlmBriefGenerator::new(provider.clone()))),
        None => GenerateBriefHandler::unconfigured(),
    }
    .with_timeout(config.ai.generation_timeout());

    let generated = generator.handle(GenerateBriefCommand::new(transcription)).await?;
    if generated.is_placeholder {
        println!("{}", serde_json::to_string_pretty(&generated.brief)?);
        return Err("the model did not return a usable brief".into());
    }
    info!(title = generated.brief.title(), "brief ready, starting questions");

    let (merger, evaluator) = match &provider {
        Some(provider) => (
            AnswerMerger::new(Arc::new(LlmBriefUpdater::new(provider.clone()))),
            CompletionEvaluator::new(Arc::new(LlmQualityAssessor::new(provider.clone()))),
        ),
        None => (AnswerMerger::local_only(), CompletionEvaluator::local_only()),
    };
    let chat = BriefChatHandler::new(merger, evaluator);

    let mut pending = chat.start(&generated.brief).await?.is_some();
    let mut printed = print_new_messages(&chat.session(), 0);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while pending {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match chat.send_message(&line).await {
            Ok(turn) => pending = turn.next_question.is_some(),
            Err(ChatError::EmptyMessage) => continue,
            Err(err) => return Err(err.into()),
        }
        printed = print_new_messages(&chat.session(), printed);
    }

    if let Some(brief) = chat.session().brief() {
        println!("{}", serde_json::to_string_pretty(brief)?);
    }
    Ok(())
}

/// Prints assistant messages past `from`; returns the new count.
fn print_new_messages(session: &BriefSession, from: usize) -> usize {
    for message in session.messages().iter().skip(from) {
        if message.role() == Role::Assistant {
            println!("\n{}", message.content());
        }
    }
    session.messages().len()
}
