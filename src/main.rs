//! GRC Advisor - questionnaire client for the advisory service
//!
//! CLI entry point for the TUI and batch commands.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use grc_advisor::api::{AdvisorClient, AdvisoryApi, AdvisoryRequest, QuestionSet};
use grc_advisor::cli::{Cli, Command, OutputFormat};
use grc_advisor::config::Config;
use grc_advisor::form::FormState;
use grc_advisor::session::SessionState;
use grc_advisor::tui;
use grc_advisor::tui::views::{line_text, plan_lines};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("grc-advisor")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("grc-advisor.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("Using advisory service at {}", config.api.base_url);

    let client: Arc<dyn AdvisoryApi> =
        Arc::new(AdvisorClient::from_config(&config.api).context("Failed to create advisory client")?);

    // Dispatch command
    match cli.command {
        Some(Command::Tui) | None => tui::run(client).await,
        Some(Command::Advise { input, format }) => cmd_advise(client, input.as_deref(), format).await,
        Some(Command::Health { format }) => cmd_health(client, format).await,
        Some(Command::Quiz { file }) => cmd_quiz(client, &file).await,
    }
}

/// Submit a questionnaire and print the plan (batch mode)
async fn cmd_advise(client: Arc<dyn AdvisoryApi>, input: Option<&std::path::Path>, format: OutputFormat) -> Result<()> {
    let request = match input {
        Some(path) => {
            let content = fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<AdvisoryRequest>(&content).context("Failed to parse questionnaire JSON")?
        }
        None => FormState::default().to_request(),
    };

    let plan = client.advise(request).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        OutputFormat::Text => {
            let session = SessionState {
                plan: Some(plan),
                ..Default::default()
            };
            for line in plan_lines(&session) {
                println!("{}", line_text(&line));
            }
        }
    }

    Ok(())
}

/// Check whether the advisory service is reachable
async fn cmd_health(client: Arc<dyn AdvisoryApi>, format: OutputFormat) -> Result<()> {
    match client.health().await {
        Ok(status) => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status.0)?),
            OutputFormat::Text => println!("Service is up: {}", status.0),
        },
        Err(e) => {
            match format {
                OutputFormat::Json => println!("{}", serde_json::json!({"error": e.to_string()})),
                OutputFormat::Text => println!("{}", e),
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Open the quiz view on a question set file
async fn cmd_quiz(client: Arc<dyn AdvisoryApi>, file: &std::path::Path) -> Result<()> {
    let content = fs::read_to_string(file).context(format!("Failed to read {}", file.display()))?;
    let quiz: QuestionSet = serde_json::from_str(&content).context("Failed to parse question set JSON")?;

    info!(kept = quiz.kept.len(), rejected = quiz.rejected.len(), "Loaded question set");

    tui::run_with_quiz(client, quiz).await
}
