//! CLI entrypoint for Draft Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use council_application::{
    NoProgress, PersistRunUseCase, ProgressNotifier, RunDeliberationUseCase, RunStore,
};
use council_domain::{DeliberationOutcome, DeliberationRequest};
use council_infrastructure::{ConfigLoader, FileConfig, JsonFileRunStore, OpenRouterEndpoint};
use council_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging based on verbosity level.
///
/// The returned guard flushes the file writer on drop and must outlive the run.
fn init_logging(cli: &Cli) -> Option<WorkerGuard> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "draft-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow!("Failed to load configuration: {e}"))
}

fn read_input(path: Option<&PathBuf>, flag: &str) -> Result<String> {
    let path: &Path = path.ok_or_else(|| anyhow!("{flag} is required"))?;
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn render(outcome: &DeliberationOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Full => ConsoleFormatter::format(outcome),
        OutputFormat::Final => ConsoleFormatter::format_final_only(outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(outcome),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli);

    info!("Starting Draft Council");

    let file_config = load_config(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", toml::to_string_pretty(&file_config)?);
        return Ok(());
    }

    // === Dependency Injection ===
    let store_dir = cli
        .store_dir
        .clone()
        .unwrap_or_else(JsonFileRunStore::default_dir);
    let store: Arc<dyn RunStore> = Arc::new(JsonFileRunStore::new(store_dir));

    if cli.list_runs {
        print!("{}", ConsoleFormatter::format_runs(&store.list().await?));
        return Ok(());
    }

    if let Some(id) = &cli.show_run {
        let record = store.load(id).await?;
        let output = match cli.output {
            OutputFormat::Json => ConsoleFormatter::format_json(&record),
            format => render(&record.outcome, format),
        };
        println!("{}", output);
        return Ok(());
    }

    let config = file_config.to_deliberation_config()?;

    let truth = read_input(cli.truth.as_ref(), "--truth")?;
    let target = read_input(cli.target.as_ref(), "--target")?;
    let notes = match &cli.notes {
        Some(path) => read_input(Some(path), "--notes")?,
        None => String::new(),
    };
    let mut request = DeliberationRequest::new(truth, target)?.with_context_notes(notes);
    if let Some(mode) = cli.ranking_mode() {
        request = request.with_ranking_mode(mode);
    }

    let endpoint = Arc::new(OpenRouterEndpoint::from_config(&file_config.endpoint)?);

    // Cancel in-flight model calls on Ctrl-C
    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let use_case = RunDeliberationUseCase::new(endpoint, config).with_cancellation(token);

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };
    let outcome = use_case
        .execute_with_progress(&request, progress.as_ref())
        .await?;

    if !cli.no_store {
        match PersistRunUseCase::new(Arc::clone(&store))
            .execute(&request, outcome.clone())
            .await
        {
            Ok(record) if !cli.quiet => eprintln!("{}", ConsoleFormatter::format_saved(&record)),
            Ok(_) => {}
            Err(e) => warn!("Failed to save run: {}", e),
        }
    }

    println!("{}", render(&outcome, cli.output));

    Ok(())
}
