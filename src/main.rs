mod api;
mod cli;
mod coach;
mod config;
mod error;
mod scoring;
mod session;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::InterviewClient;
use crate::cli::{Cli, Command};
use crate::coach::Coach;
use crate::config::CoachConfig;
use crate::session::ExperienceLevel;
use crate::ui::Terminal;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CoachConfig::load()?;
    config.override_api_url(cli.api_url.clone());
    config.validate()?;

    init_tracing(&config, cli.verbose);

    let client = InterviewClient::new(config.api_url.as_str())?;
    info!(api_url = client.base_url(), "using backend");

    match cli.command {
        Command::Practice {
            role,
            experience,
            report,
        } => {
            let mut ui = Terminal::new();
            let mut coach = Coach::new(client);
            coach
                .run_interactive(&mut ui, role, experience.map(Into::into), report.as_deref())
                .await?;
        }
        Command::Questions {
            role,
            experience,
            json,
        } => {
            let level = ExperienceLevel::from(experience);
            let mut ui = Terminal::new();
            let spinner = ui.spinner("Generating questions...");
            let result = client.generate_questions(&role, level.as_str()).await;
            spinner.finish_and_clear();

            let questions = result?;
            if json {
                println!("{}", serde_json::to_string_pretty(&questions)?);
            } else {
                ui.render_question_list(&questions)?;
            }
        }
        Command::Ping => {
            let payload = client.health_check().await?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level, or `debug` with `--verbose`.
/// Logs go to stderr so they stay out of the interactive screens.
fn init_tracing(config: &CoachConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME")))
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
