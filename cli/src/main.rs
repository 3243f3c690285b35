//! CLI entrypoint for scribe
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use scribe_application::ports::progress::{NoProgress, ProgressNotifier};
use scribe_application::ports::research_history::ResearchHistory;
use scribe_application::{ResearchParams, RunResearchInput, RunResearchUseCase};
use scribe_domain::{Model, ResearchRequest};
use scribe_infrastructure::{
    ConfigLoader, FileConfig, JsonlResearchHistory, OpenAiGateway, TavilySearchGateway,
};
use scribe_presentation::{
    Cli, ConsoleFormatter, ProgressReporter, SimpleProgress, format_history, format_report,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Model override read when `--model` is absent
const MODEL_ENV: &str = "OPENAI_MODEL";
/// Sources-per-query override read when `--max-sources` is absent
const MAX_SOURCES_ENV: &str = "TAVILY_MAX_SOURCES";

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; keys may come from the environment or config
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    info!("Starting scribe");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    for issue in config.validate() {
        warn!("config: {}", issue);
    }

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    if let Some(limit) = cli.history {
        return show_history(&config, limit);
    }

    let Some(topic) = cli.topic.clone() else {
        bail!("A topic is required. Pass it with --topic.");
    };

    let params = resolve_params(&cli, &config);
    params.validate()?;

    let mut request = ResearchRequest::new(topic)?;
    if let Some(requirements) = cli.requirements.as_deref().filter(|r| !r.trim().is_empty()) {
        request = request.with_requirements(requirements);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiGateway::new(&config.providers.openai, params.timeout)?);
    let search = Arc::new(TavilySearchGateway::new(&config.search.tavily, params.timeout)?);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nInterrupted, stopping after the current request...");
                cancel.cancel();
            }
        });
    }

    let mut use_case = RunResearchUseCase::new(gateway, search).with_cancellation(cancel);
    if config.history.enabled
        && let Some(history) = open_history(&config)
    {
        use_case = use_case.with_history(history);
    }

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if config.output.show_progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    info!(model = %params.model, topic = %request.topic(), "Running research");
    let input = RunResearchInput::new(request).with_params(params);
    let result = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;

    let format = cli
        .format
        .map(scribe_domain::OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let output = match format {
        scribe_domain::OutputFormat::Full => ConsoleFormatter::format(&result),
        scribe_domain::OutputFormat::Final => ConsoleFormatter::format_final_only(&result),
        scribe_domain::OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };
    println!("{}", output);

    if let Some(path) = &cli.output {
        std::fs::write(path, format_report(&result))
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        if !cli.quiet {
            eprintln!("Report saved to {}", path.display());
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level, optionally mirrored to a
/// daily log file under `--log-dir`.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let Some(dir) = &cli.log_dir else {
        tracing_subscriber::registry()
            .with(EnvFilter::new(level))
            .with(console)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "scribe.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(console)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(Some(guard))
}

/// Config values, then environment overrides, then command-line flags.
fn resolve_params(cli: &Cli, config: &FileConfig) -> ResearchParams {
    let mut params = config.research.to_params();

    let model = cli
        .model
        .clone()
        .or_else(|| std::env::var(MODEL_ENV).ok())
        .filter(|m| !m.trim().is_empty());
    if let Some(model) = model {
        params = params.with_model(model.parse::<Model>().unwrap_or_default());
    }

    let max_sources = cli.max_sources.or_else(|| {
        std::env::var(MAX_SOURCES_ENV)
            .ok()
            .and_then(|v| v.trim().parse().ok())
    });
    if let Some(max) = max_sources {
        params = params.with_max_sources_per_query(max);
    }

    if let Some(max) = cli.max_query_length {
        params = params.with_max_query_length(max);
    }
    if let Some(seconds) = cli.timeout {
        params = params.with_timeout_seconds(seconds);
    }

    params
}

fn open_history(config: &FileConfig) -> Option<Arc<dyn ResearchHistory>> {
    let path = config.history.resolved_path()?;
    match JsonlResearchHistory::new(&path) {
        Some(history) => Some(Arc::new(history)),
        None => {
            warn!("history disabled: cannot open {}", path.display());
            None
        }
    }
}

fn show_history(config: &FileConfig, limit: usize) -> Result<()> {
    let Some(history) = open_history(config) else {
        bail!("No history file available. Check [history] in your config.");
    };
    let records = history.recent(limit)?;
    print!("{}", format_history(&records));
    Ok(())
}
