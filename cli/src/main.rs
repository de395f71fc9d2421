//! CLI entrypoint for midi
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use midi_application::{SearchError, SessionController};
use midi_infrastructure::{
    ConfigLoader, FileConfig, GeminiConfig, GeminiSuggestionService, StaticMapBuilder,
};
use midi_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressMode, RatingRepl, ReplConfig,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // Logs go to stderr so json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting midi");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = load_config(&cli)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let service = Arc::new(GeminiSuggestionService::new(GeminiConfig::from(&config.gemini))?);
    let mut search_config = config.search.to_search_config();
    if let Some(count) = cli.count {
        search_config = search_config.with_suggestion_count(count);
    }
    let controller = Arc::new(SessionController::new(service, search_config));

    // Reverse geocoding mode
    if let Some(coords) = cli.locate {
        let address = controller.locate(coords).await?;
        println!("{}", address);
        return Ok(());
    }

    if cli.friends.is_empty() {
        bail!("At least one --friend is required. Use --help for the friend syntax.");
    }

    let progress = ProgressMode::detect(cli.quiet, std::io::stderr().is_terminal()).notifier();
    let result = controller
        .search_with_progress(cli.friends.clone(), progress.as_ref())
        .await;

    if let Err(e) = result {
        // JSON consumers still get the error field
        if cli.output == OutputFormat::Json {
            println!("{}", ConsoleFormatter::format_json(&controller.snapshot()));
        }
        return Err(search_failure(e));
    }

    let snapshot = controller.snapshot();
    let maps = StaticMapBuilder::new(config.maps_api_key().map(str::to_string));

    match cli.output {
        OutputFormat::Json => {
            println!("{}", ConsoleFormatter::format_json(&snapshot));
            return Ok(());
        }
        OutputFormat::Text => {
            println!("{}", ConsoleFormatter::format_results(&snapshot));
            if let Some(results) = snapshot.results.as_ref() {
                println!("{}", ConsoleFormatter::format_map(&maps.build(results)));
            }
        }
    }

    if cli.no_repl || !std::io::stdin().is_terminal() {
        return Ok(());
    }

    let repl_config = ReplConfig {
        show_progress: !cli.quiet,
        ..ReplConfig::default()
    };
    RatingRepl::new(controller, cli.friends, maps)
        .with_config(repl_config)
        .run()
        .await?;

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    config.validate()?;
    Ok(config)
}

fn search_failure(error: SearchError) -> anyhow::Error {
    anyhow::anyhow!("Search failed: {}", error)
}
