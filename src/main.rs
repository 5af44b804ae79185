use anyhow::{Context, Result};
use clap::Parser;
use secrecy::ExposeSecret;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::Bot;

use newsbot::bot::{telegram, BotController};
use newsbot::config::{Config, TOKEN_ENV};
use newsbot::feed::FeedFetcher;

#[derive(Parser, Debug)]
#[command(name = "newsbot", about = "Telegram bot serving the latest RSS headlines per category")]
struct Args {
    /// Path to the TOML configuration file (optional)
    #[arg(long, value_name = "FILE", default_value = "newsbot.toml")]
    config: PathBuf,

    /// Load environment variables from this file instead of ./.env
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("newsbot=info")),
        )
        .init();

    let args = Args::parse();

    match &args.env_file {
        Some(path) => {
            dotenv::from_path(path)
                .with_context(|| format!("Failed to load env file: {}", path.display()))?;
        }
        None => {
            // A missing ./.env is fine
            if let Err(e) = dotenv::dotenv() {
                tracing::debug!(error = %e, "No .env file loaded");
            }
        }
    }

    let config = Config::from_sources(&args.config)
        .with_context(|| format!("Failed to load config: {}", args.config.display()))?;
    tracing::debug!(config = ?config, "Effective configuration");

    let token = config
        .bot_token
        .as_ref()
        .with_context(|| format!("Bot token missing: set {TOKEN_ENV} or bot_token in the config file"))?;

    let source = Arc::new(config.feed_source());
    for category in source.categories() {
        match &category.url {
            Some(url) => tracing::info!(category = %category.key, url = %url, "Category configured"),
            None => tracing::warn!(category = %category.key, "Category has no feed URL"),
        }
    }

    let fetcher =
        FeedFetcher::new(&config.fetch_settings()).context("Failed to build HTTP client")?;
    let controller = Arc::new(BotController::new(source, fetcher));

    let bot = Bot::new(token.expose_secret());
    telegram::run(bot, controller).await;

    Ok(())
}
