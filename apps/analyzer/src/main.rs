mod config;
mod errors;
mod intake;
mod models;
mod render;
mod scoring_client;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::intake::{is_accepted_extension, ACCEPT_HINT};
use crate::models::{SlotName, UploadFile};
use crate::render::{render_error, render_json, render_text, ResultsView};
use crate::scoring_client::ScoreClient;
use crate::session::{Session, SubmitOutcome};

#[derive(Parser)]
#[command(name = "analyzer")]
#[command(about = "ATS resume analyzer: score a resume against a job description")]
#[command(version)]
struct Cli {
    /// Scoring service origin
    #[arg(long, global = true, env = "ANALYZER_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a resume and a job description and show the match analysis
    Score {
        /// Resume file (PDF or DOCX, max 5MB)
        #[arg(long)]
        resume: Option<PathBuf>,
        /// Job description file (PDF or DOCX, max 5MB)
        #[arg(long)]
        jd: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check that the scoring service is reachable
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    let default_level = if cli.verbose {
        "debug"
    } else {
        config.rust_log.as_str()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(base_url) = cli.base_url {
        config.client.base_url = base_url;
    }

    info!("ATS analyzer v{}", env!("CARGO_PKG_VERSION"));

    let client = ScoreClient::new(config.client.clone()).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Score { resume, jd, format } => run_score(&client, resume, jd, format).await,
        Commands::Health => run_health(&client).await,
    }
}

async fn run_score(
    client: &ScoreClient,
    resume: Option<PathBuf>,
    jd: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let session = Session::new();

    for (slot, path) in [(SlotName::Resume, resume), (SlotName::Jd, jd)] {
        let Some(path) = path else { continue };
        let file = match UploadFile::from_path(&path).await {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(slot = %slot, path = %path.display(), "read failed: {e}");
                eprintln!("{}", render_error(&format!("{}: {}", slot.label(), e.user_message())));
                return Ok(ExitCode::FAILURE);
            }
        };
        eprintln!(
            "  {} {}: {} ({} bytes)",
            style("✓").green(),
            slot.label(),
            file.name,
            file.size()
        );
        if !is_accepted_extension(&file.name) {
            eprintln!(
                "  {} {} may be rejected by the server: {ACCEPT_HINT}",
                style("!").yellow(),
                file.name
            );
        }
        session.select(slot, vec![file]);
    }

    for slot in SlotName::ALL {
        if session.snapshot().form.slot(slot).is_empty() {
            eprintln!("  {} {}: none selected ({ACCEPT_HINT})", style("!").yellow(), slot.label());
        }
    }

    let spinner = if session.can_submit() {
        Some(analyzing_spinner()?)
    } else {
        None
    };
    let outcome = session.submit(client).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match outcome {
        SubmitOutcome::Succeeded => {
            let snapshot = session.snapshot();
            let Some(result) = snapshot.result else {
                bail!("analysis finished without a result");
            };
            let view = ResultsView::from_payload(&result);
            match format {
                OutputFormat::Text => print!("{}", render_text(&view)),
                OutputFormat::Json => println!("{}", render_json(&view)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rejected(message) | SubmitOutcome::Failed(message) => {
            eprintln!("{}", render_error(&message));
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Ignored => bail!("a submission is already in progress"),
    }
}

async fn run_health(client: &ScoreClient) -> Result<ExitCode> {
    match client.health().await {
        Ok(health) => {
            println!(
                "{} {} is {}",
                style("✓").green(),
                client.config().base_url,
                health.status
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!("health check failed: {e}");
            eprintln!("{}", render_error(&e.health_message()));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn analyzing_spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("invalid spinner template")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Analyzing...");
    Ok(spinner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_base_url_falls_back_to_environment() {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "base_url")
            .unwrap();
        assert_eq!(
            arg.get_env(),
            Some(std::ffi::OsStr::new("ANALYZER_BASE_URL"))
        );
    }

    #[test]
    fn test_base_url_flag_is_global() {
        let cli = Cli::try_parse_from(["analyzer", "health", "--base-url", "http://localhost:5000"])
            .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:5000"));
        assert!(matches!(cli.command, Commands::Health));
    }
}
