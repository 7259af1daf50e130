use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lnkr::{
    api::HttpApi,
    config::ClientConfig,
    controllers::{ChartController, FormController},
    history::LocalHistory,
    render::{history_table, TerminalView},
    store::SqliteStore,
};

#[derive(Parser)]
#[command(name = "lnkr", version, about = "Shorten URLs and browse link statistics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a short link for TARGET
    Shorten {
        target: String,
        /// Custom short link instead of a generated one
        #[arg(short, long, default_value = "")]
        alias: String,
    },
    /// List the short links created from this machine
    History,
    /// Show creation, use and link-space statistics
    Stats,
}

// ── Entry point ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env if present; env vars may already be set
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lnkr=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    tracing::debug!("Backend: {}", config.api_url);

    let api = Arc::new(HttpApi::new(
        config.api_url.clone(),
        config.create_path.clone(),
        config.request_timeout,
    )?);

    match cli.command {
        Command::Shorten { target, alias } => {
            let history = open_history(&config).await?;
            let view = TerminalView::stdout(&config.short_host);
            let form = FormController::new(api, view, &config.short_host).with_history(history);

            match form.submit(&target, &alias).await {
                Ok(_) => Ok(ExitCode::SUCCESS),
                Err(_) => Ok(ExitCode::FAILURE),
            }
        }
        Command::History => {
            let history = open_history(&config).await?;
            let links = history
                .read_all()
                .await
                .context("could not read the local history")?;
            print!("{}", history_table(&links, &config.short_host, chrono::Utc::now()));
            Ok(ExitCode::SUCCESS)
        }
        Command::Stats => {
            let charts = ChartController::new(api, TerminalView::stdout(&config.short_host));
            let report = charts.draw_all().await;
            tracing::debug!("Drew {} of 3 charts", report.drawn());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn open_history(config: &ClientConfig) -> anyhow::Result<Arc<LocalHistory>> {
    let store = SqliteStore::connect(&config.history_db)
        .await
        .with_context(|| format!("could not open history database {}", config.history_db))?;
    tracing::debug!("History database: {}", config.history_db);

    Ok(Arc::new(LocalHistory::new(Arc::new(store))))
}
