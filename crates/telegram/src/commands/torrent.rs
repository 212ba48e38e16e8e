//! Torrent client commands (list, magnet)

use crate::config::BotConfig;
use crate::constants::{emoji, usage, MAX_TORRENT_FILE_SIZE};
use crate::error::BotError;
use crate::handlers;
use crate::kinds::TorrentList;
use crate::list::ListState;
use crate::session::{Session, SessionStore};
use crate::types::{HandlerResult, MyDialogue, Services, State};
use std::sync::Arc;
use teloxide::{net::Download, prelude::*, types::Document};

/// Browse the torrents of the torrent client
pub async fn list(
    bot: Bot,
    msg: Message,
    services: Services,
    sessions: Arc<SessionStore>,
    config: Arc<BotConfig>,
) -> HandlerResult {
    let list = ListState::new(TorrentList::new(services.torrent.clone()), config.page_size);
    handlers::open_list(&bot, msg.chat.id, &sessions, Session::Torrents(list)).await
}

/// Request magnet link from user
pub async fn get_magnet(bot: Bot, dialogue: MyDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, usage::MAGNET).await?;
    dialogue.update(State::GetMagnet).await?;
    Ok(())
}

/// Add a magnet link, torrent URL or .torrent file to the torrent client
pub async fn magnet(bot: Bot, dialogue: MyDialogue, msg: Message, services: Services) -> HandlerResult {
    if let Some(document) = msg.document().cloned() {
        return handle_torrent_file(bot, dialogue, msg, services, &document).await;
    }

    let Some(text) = msg.text().map(str::trim).filter(|t| !t.is_empty()) else {
        let err = BotError::InvalidArguments("Please send a valid magnet link, torrent URL, or .torrent file.".into());
        return handlers::send_error(&bot, msg.chat.id, &err).await;
    };

    match services.torrent.add_url(text).await {
        Ok(_) => {
            handlers::send_response(
                &bot,
                msg.chat.id,
                emoji::SUCCESS,
                "Torrent added successfully to download queue!",
            )
            .await?;
        }
        Err(err) => {
            tracing::error!("Failed to add torrent: {}", err);
            handlers::send_error(&bot, msg.chat.id, &BotError::from(err)).await?;
        }
    }

    dialogue.exit().await?;
    Ok(())
}

/// Handle .torrent file uploads
async fn handle_torrent_file(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    services: Services,
    document: &Document,
) -> HandlerResult {
    let filename = document.file_name.as_deref().unwrap_or("unknown");

    if !filename.ends_with(".torrent") {
        let err = BotError::InvalidArguments("Invalid file type. Please send a .torrent file.".into());
        return handlers::send_error(&bot, msg.chat.id, &err).await;
    }

    if document.file.size > MAX_TORRENT_FILE_SIZE {
        let err = BotError::InvalidArguments(format!(
            "File too large. Maximum size is {} MB.",
            MAX_TORRENT_FILE_SIZE / (1024 * 1024)
        ));
        return handlers::send_error(&bot, msg.chat.id, &err).await;
    }

    tracing::info!("Received torrent file: {} ({} bytes)", filename, document.file.size);

    let file = match bot.get_file(&document.file.id).await {
        Ok(f) => f,
        Err(err) => {
            tracing::error!("Failed to get file from Telegram: {}", err);
            return handlers::send_error(&bot, msg.chat.id, &BotError::from(err)).await;
        }
    };

    let mut file_data = Vec::new();
    if let Err(err) = bot.download_file(&file.path, &mut file_data).await {
        tracing::error!("Failed to download file: {}", err);
        let err = BotError::Message(format!("Failed to download file: {}", err));
        return handlers::send_error(&bot, msg.chat.id, &err).await;
    }

    if !file_data.starts_with(b"d") {
        let err = BotError::InvalidArguments("Invalid .torrent file format".into());
        return handlers::send_error(&bot, msg.chat.id, &err).await;
    }

    match services.torrent.add_file(filename, file_data).await {
        Ok(_) => {
            handlers::send_response(
                &bot,
                msg.chat.id,
                emoji::SUCCESS,
                &format!("Torrent file '{}' added successfully!", filename),
            )
            .await?;
        }
        Err(err) => {
            tracing::error!("Failed to add torrent file: {}", err);
            handlers::send_error(&bot, msg.chat.id, &BotError::from(err)).await?;
        }
    }

    dialogue.exit().await?;
    Ok(())
}
