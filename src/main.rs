// src/main.rs
use clap::Parser;
use is_terminal::IsTerminal;
use scope_scout::cli::{Cli, OutputFormat};
use scope_scout::config::Config;
use scope_scout::output::{self, csv, human, json, scope_toml, ViewRenderer};
use scope_scout::progress::LoadingSpinner;
use scope_scout::source::ImportEndpoint;
use scope_scout::view::{LoadState, ProgramsView, LOADING_MESSAGE};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Validate arguments
    cli.validate()?;

    // Load config file
    let mut config = Config::load(cli.config.as_deref().map(Path::new))?;

    // Apply CLI overrides
    if let Some(ref url) = cli.endpoint {
        config.endpoint.base_url = url.clone();
    }

    // Initialize logging; flags win over RUST_LOG, RUST_LOG over config
    let env_filter = match cli.log_level() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting scope-scout...");

    let source = ImportEndpoint::new(&config.endpoint)?;
    tracing::debug!("Import endpoint: {}", source.url());

    // Ctrl-C tears the view down; an in-flight response is then discarded
    let (teardown_tx, teardown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, tearing down view");
            teardown_tx.send(true).ok();
        }
    });

    let renderer: Box<dyn ViewRenderer> = match (cli.output_format(), cli.output.as_deref()) {
        (OutputFormat::Human, Some(path)) => {
            tracing::info!("Writing human-readable output to: {}", path);
            Box::new(human::HumanOutput::to_file(std::fs::File::create(path)?))
        }
        (OutputFormat::Human, None) => Box::new(human::HumanOutput::new()),
        (OutputFormat::Json, Some(path)) => {
            tracing::info!("Writing JSON output to: {}", path);
            Box::new(json::JsonOutput::to_file(std::fs::File::create(path)?))
        }
        (OutputFormat::Json, None) => Box::new(json::JsonOutput::new()),
        (OutputFormat::Csv, Some(path)) => {
            tracing::info!("Writing CSV output to: {}", path);
            Box::new(csv::CsvOutput::to_file(std::fs::File::create(path)?))
        }
        (OutputFormat::Csv, None) => Box::new(csv::CsvOutput::new()),
    };

    let spinner = LoadingSpinner::new(cli.should_show_progress() && std::io::stderr().is_terminal());
    if spinner.is_enabled() {
        spinner.start(LOADING_MESSAGE);
    } else if !cli.export_scope {
        // Loading line goes to stderr; stdout carries only the settled view
        renderer.render_loading()?;
        renderer.flush()?;
    }

    let mut view = ProgramsView::new();
    view.mount(&source, teardown_rx).await;
    spinner.finish();

    if view.is_disposed() {
        tracing::info!("View torn down before programs loaded. Exiting.");
        return Ok(ExitCode::from(130));
    }

    // Handle --export-scope flag
    if cli.export_scope {
        if let LoadState::Ready(programs) = view.state() {
            tracing::info!("Exporting scope of {} programs to TOML format...", programs.len());
            let toml_output = scope_toml::export_scope(programs)?;
            match cli.output.as_deref() {
                Some(path) => std::fs::write(path, toml_output)?,
                None => print!("{}", toml_output),
            }
            tracing::info!("Export complete. Exiting.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    output::render_view(renderer.as_ref(), &view)?;

    match view.state() {
        LoadState::Error(_) => Ok(ExitCode::FAILURE),
        _ => Ok(ExitCode::SUCCESS),
    }
}
