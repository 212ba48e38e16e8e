use std::sync::Arc;
use telegram::telegram::{schema, set_bot_commands};
use telegram::{BotConfig, Services, SessionStore, SetupStore, State};
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use torrent::{ApiResult, JackettApi, TorrServerApi, TorrentApi};
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber; `LOG_FORMAT=json` selects JSON output
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn services_from_env() -> ApiResult<Services> {
    Ok(Services {
        torrent: TorrentApi::from_env()?,
        jackett: JackettApi::from_env()?,
        torrserver: TorrServerApi::from_env()?,
    })
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();
    init_logging();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return;
        }
    };

    let services = match services_from_env() {
        Ok(services) => services,
        Err(e) => {
            tracing::error!("{}", e);
            return;
        }
    };

    // Authenticate with qBittorrent
    if let Err(e) = services.torrent.login().await {
        tracing::error!("Failed to login to qBittorrent: {}", e);
        tracing::error!("Please check your credentials in the .env file");
        return;
    }
    tracing::info!("qBittorrent client authenticated");

    // Initialize the bot from environment variables
    let bot = Bot::from_env();
    if let Err(e) = set_bot_commands(&bot).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }

    tracing::info!(
        "Bot started successfully! ({} allowed users, {} items per page)",
        config.allowed_users.len(),
        config.page_size
    );

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![
            InMemStorage::<State>::new(),
            services,
            Arc::new(SessionStore::new()),
            Arc::new(SetupStore::new()),
            Arc::new(config)
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builds() {
        let _handler = schema();
    }

}
