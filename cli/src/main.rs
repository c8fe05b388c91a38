//! CLI entrypoint for docchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;
mod overrides;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use docchat_application::{AppContext, ChatController, ResponseOutcome};
use docchat_infrastructure::{
    ChunkSplitter, ConfigLoader, EmbeddingIndexBuilder, JsonlConversationLogger, OpenAiClient,
    OpenAiEngineFactory, resolve_api_key,
};
use docchat_presentation::{ChatRepl, Cli, ProgressReporter, ReplConfig, SimpleProgress};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    overrides::apply(&cli, &mut config);

    let _log_guard = logging::init_tracing(
        cli.verbose,
        config.logging.log_dir.as_deref().map(Path::new),
    )?;

    info!("Starting docchat");

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("config: {issue}");
        }
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }

    let preset = config.preset()?;
    let source = config.source()?;
    let session_config = config.session_config()?;
    let system_prompt = config.system_prompt()?;

    // === Dependency Injection ===
    let api_key = resolve_api_key(&config.llm)?;
    let client = Arc::new(OpenAiClient::new(&config.llm, api_key)?);

    let splitter = ChunkSplitter::new(config.retrieval.chunk_size, config.retrieval.chunk_overlap)?;
    let builder = EmbeddingIndexBuilder::new(splitter, client.clone())
        .with_batch_size(config.retrieval.embed_batch_size);
    let factory = OpenAiEngineFactory::new(client, system_prompt);

    let mut context = AppContext::new(
        Arc::new(builder),
        Arc::new(factory),
        source.clone(),
        session_config,
    );
    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Conversation log: {}", path);
                context = context.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Conversation log {} could not be opened", path),
        }
    }
    let context = Arc::new(context);

    // The index is built before the first prompt; a failed build ends the process
    let show_progress = !cli.quiet && config.repl.show_progress;
    let built = if show_progress {
        let reporter = ProgressReporter::new(&source);
        context.index_with_progress(&reporter).await
    } else if cli.quiet {
        context.index().await
    } else {
        context.index_with_progress(&SimpleProgress).await
    };
    built.with_context(|| format!("Could not build the index from {source}"))?;

    let controller = ChatController::new(context);
    let repl = ChatRepl::new(controller, preset).with_config(ReplConfig {
        history_file: config.repl.history_file.as_ref().map(PathBuf::from),
    });

    if let Some(question) = cli.question.as_deref() {
        return match repl.ask(question).await? {
            ResponseOutcome::Answered => Ok(()),
            ResponseOutcome::Idle => bail!("The question is empty"),
            ResponseOutcome::Failed(e) => bail!("The question could not be answered: {e}"),
        };
    }

    repl.run().await?;
    Ok(())
}
