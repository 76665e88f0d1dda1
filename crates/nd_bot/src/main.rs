//! News digest bot: fetches articles, cleans and groups them, and
//! serves short and detailed summaries over a chat interface.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use nd_core::{NewsSource, Result};
use nd_inference::{create_model, Config};
use nd_sources::NewsApiClient;

mod commands;
mod digest;
mod session;
mod telegram;
mod text;

use commands::Bot;
use digest::DigestService;
use telegram::TelegramClient;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Summarizer backend. Available models: ollama (default), dummy
    #[arg(long, default_value = "ollama")]
    model: String,
    /// Base URL of the model server
    #[arg(long)]
    model_url: Option<String>,
    /// Search query used for the digest feed
    #[arg(long, default_value = "science")]
    query: String,
    /// News fetch timeout in seconds
    #[arg(long, default_value_t = 30)]
    fetch_timeout: u64,
    /// Long-poll window for chat updates in seconds
    #[arg(long, default_value_t = 30)]
    poll_timeout: u64,
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{name} must be set").into())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let bot_token = env_var("BOT_TOKEN")?;
    let news_api_key = env_var("NEWSAPI_KEY")?;

    let source: Arc<dyn NewsSource> = Arc::new(
        NewsApiClient::new(news_api_key)?
            .with_timeout(Duration::from_secs(cli.fetch_timeout)),
    );
    info!(source = source.name(), query = %cli.query, "news source initialized");

    let summarizer = create_model(Some(Config {
        model_name: Some(cli.model.clone()),
        model_url: cli.model_url.clone(),
    }))
    .await?;

    let telegram = TelegramClient::new(&bot_token)?;
    if let Err(e) = telegram.set_my_commands(&commands::bot_commands()).await {
        warn!(error = %e, "failed to register bot commands; continuing");
    }

    let bot = Bot {
        telegram,
        digest: DigestService::new(source, summarizer, cli.query),
    };

    info!("bot started, listening for commands");
    let mut offset = 0i64;
    loop {
        match bot.telegram.get_updates(offset, cli.poll_timeout).await {
            Ok(updates) => {
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    if let Some(message) = update.message {
                        commands::handle_update(&bot, &message).await;
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "polling for updates failed");
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}
