//! Callback query handlers for inline keyboard interactions
//!
//! Callback data is routed by shape: `cmd:*` menu shortcuts, `setup:*`
//! tracker toggles, `act:*` item actions and finally list tokens.

use crate::actions::ItemAction;
use crate::commands;
use crate::config::BotConfig;
use crate::constants::{emoji, usage, MAX_CALLBACK_DATA_LEN};
use crate::handlers;
use crate::kinds::{SearchList, StreamList, TorrentList};
use crate::list::{ListCommand, ListEvent, ListState};
use crate::session::{Session, SessionStore, SetupStore};
use crate::types::{HandlerResult, MyDialogue, Services, State};
use std::sync::Arc;
use teloxide::{
    prelude::*,
    types::{InputFile, MessageId},
};
use torrent::{SearchHit, StreamEntry, TorrentEntry};

/// What to do with the list once an item action has run
enum AfterAction {
    /// Re-render the current items
    Rerender,
    /// Report a status, then reload the items
    Reload(String),
}

/// Handle all callback queries from inline keyboards
#[allow(clippy::too_many_arguments)]
pub async fn handle_callback(
    bot: Bot,
    dialogue: MyDialogue,
    q: CallbackQuery,
    services: Services,
    sessions: Arc<SessionStore>,
    setup: Arc<SetupStore>,
    config: Arc<BotConfig>,
) -> HandlerResult {
    // Answer callback query to remove loading state
    bot.answer_callback_query(&q.id).await?;

    let data = match q.data {
        Some(ref data) => data.as_str(),
        None => return Ok(()),
    };

    if data.len() > MAX_CALLBACK_DATA_LEN {
        tracing::warn!("Callback data too long: {} bytes", data.len());
        return Ok(());
    }

    let (chat_id, message_id) = match q.message {
        Some(ref msg) => (msg.chat.id, msg.id),
        None => return Ok(()),
    };

    if let Some(command) = data.strip_prefix("cmd:") {
        return handle_menu_callback(&bot, dialogue, &q, command, &services, &sessions, &setup, &config).await;
    }

    if commands::handle_setup_callback(&bot, &q, data, &services, &setup).await? {
        return Ok(());
    }

    if let Some(action) = ItemAction::parse(data) {
        return handle_action_callback(&bot, chat_id, message_id, action, &services, &sessions).await;
    }

    if let Some(command) = ListCommand::parse(data) {
        return handle_list_callback(&bot, chat_id, message_id, command, &sessions).await;
    }

    tracing::warn!("Unknown callback data: {}", data);
    Ok(())
}

/// Main menu shortcuts
#[allow(clippy::too_many_arguments)]
async fn handle_menu_callback(
    bot: &Bot,
    dialogue: MyDialogue,
    q: &CallbackQuery,
    command: &str,
    services: &Services,
    sessions: &SessionStore,
    setup: &SetupStore,
    config: &BotConfig,
) -> HandlerResult {
    let Some(chat_id) = q.message.as_ref().map(|m| m.chat.id) else {
        return Ok(());
    };

    match command {
        "find" => {
            bot.send_message(chat_id, usage::FIND).await?;
            dialogue.update(State::AwaitQuery).await?;
        }
        "list" => {
            let list = ListState::new(TorrentList::new(services.torrent.clone()), config.page_size);
            handlers::open_list(bot, chat_id, sessions, Session::Torrents(list)).await?;
        }
        "lsts" => {
            let list = ListState::new(StreamList::new(services.torrserver.clone()), config.page_size);
            handlers::open_list(bot, chat_id, sessions, Session::Stream(list)).await?;
        }
        "setup" => {
            commands::send_setup_keyboard(bot, chat_id, q.from.id, services, setup).await?;
        }
        other => tracing::warn!("Unknown menu command: {}", other),
    }
    Ok(())
}

/// Page, sort, filter, reload and selection buttons of a list message
async fn handle_list_callback(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    command: ListCommand,
    sessions: &SessionStore,
) -> HandlerResult {
    let Some(shared) = sessions.get(chat_id) else {
        bot.send_message(chat_id, "This list has expired, please request it again.")
            .await?;
        return Ok(());
    };
    let mut session = shared.lock().await;

    if session.list_message != Some(message_id) {
        tracing::debug!("Ignoring button of a superseded list in chat {}", chat_id.0);
        return Ok(());
    }

    if session.list.selected_index().is_some() || session.action_message.is_some() {
        handlers::close_action_menu(bot, chat_id, &mut session).await;
    }

    match session.list.apply(command).await {
        ListEvent::Selected(_) => handlers::show_action_menu(bot, chat_id, &mut session).await,
        ListEvent::Rerender => handlers::refresh_page(bot, chat_id, &mut session).await,
        ListEvent::Unchanged => Ok(()),
    }
}

/// Buttons of the action menu of the selected item
async fn handle_action_callback(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    action: ItemAction,
    services: &Services,
    sessions: &SessionStore,
) -> HandlerResult {
    let Some(shared) = sessions.get(chat_id) else {
        return Ok(());
    };
    let mut session = shared.lock().await;

    if session.action_message != Some(message_id) {
        tracing::debug!("Ignoring stale action menu in chat {}", chat_id.0);
        return Ok(());
    }

    if action == ItemAction::Return {
        handlers::close_action_menu(bot, chat_id, &mut session).await;
        return Ok(());
    }

    let after = match &mut session.list {
        Session::Search(list) => search_action(bot, chat_id, action, list, services).await?,
        Session::Torrents(list) => match list.selected().cloned() {
            Some(entry) => torrent_action(action, &entry, services).await,
            None => AfterAction::Rerender,
        },
        Session::Stream(list) => match list.selected().cloned() {
            Some(entry) => stream_action(action, &entry, services).await,
            None => AfterAction::Rerender,
        },
    };

    handlers::close_action_menu(bot, chat_id, &mut session).await;

    match after {
        AfterAction::Rerender => {}
        AfterAction::Reload(status) => {
            bot.send_message(chat_id, status).await?;
            session.list.reload().await;
        }
    }
    handlers::refresh_page(bot, chat_id, &mut session).await
}

async fn search_action(
    bot: &Bot,
    chat_id: ChatId,
    action: ItemAction,
    list: &mut ListState<SearchList>,
    services: &Services,
) -> Result<AfterAction, Box<dyn std::error::Error + Send + Sync>> {
    let Some(hit) = list.selected().cloned() else {
        return Ok(AfterAction::Rerender);
    };

    match action {
        ItemAction::Download => match services.torrent.add_hit(&hit).await {
            Ok(_) => list.kind_mut().mark_downloaded(&hit),
            Err(err) => {
                tracing::error!("Failed to add {} to the torrent client: {}", hit.title, err);
                bot.send_message(chat_id, format!("{} {}", emoji::ERROR, action.outcome(false)))
                    .await?;
            }
        },
        ItemAction::TorrServer => match add_to_torrserver(&hit, services).await {
            Ok(_) => list.kind_mut().mark_streamed(&hit),
            Err(err) => {
                tracing::error!("Failed to add {} to TorrServer: {}", hit.title, err);
                bot.send_message(chat_id, format!("{} {}", emoji::ERROR, action.outcome(false)))
                    .await?;
            }
        },
        ItemAction::SendFile => send_torrent_file(bot, chat_id, &hit, services).await?,
        ItemAction::SendMagnet => {
            if let Some(magnet) = &hit.magnet_uri {
                bot.send_message(chat_id, magnet.clone()).await?;
            }
        }
        ItemAction::OpenPage => {
            if let Some(details) = &hit.details {
                bot.send_message(chat_id, details.clone()).await?;
            }
        }
        other => tracing::warn!("Action {:?} does not apply to search results", other),
    }
    Ok(AfterAction::Rerender)
}

async fn add_to_torrserver(hit: &SearchHit, services: &Services) -> torrent::ApiResult<()> {
    let link = hit
        .link_or_magnet()
        .ok_or_else(|| torrent::ApiError::Unsupported("no link or magnet to stream".to_string()))?;
    services.torrserver.add(link, &hit.title, hit.poster.as_deref()).await
}

async fn send_torrent_file(bot: &Bot, chat_id: ChatId, hit: &SearchHit, services: &Services) -> HandlerResult {
    let Some(link) = &hit.link else {
        return Ok(());
    };

    match services.jackett.download(link).await {
        Ok(data) => {
            let file = InputFile::memory(data).file_name(format!("{}.torrent", hit.title));
            bot.send_document(chat_id, file).await?;
        }
        Err(err) => {
            tracing::error!("Failed to download .torrent for {}: {}", hit.title, err);
            bot.send_message(chat_id, format!("{} {}", emoji::ERROR, ItemAction::SendFile.outcome(false)))
                .await?;
        }
    }
    Ok(())
}

async fn torrent_action(action: ItemAction, entry: &TorrentEntry, services: &Services) -> AfterAction {
    let result = match action {
        ItemAction::Remove => services.torrent.remove(&entry.hash).await,
        ItemAction::Start => services.torrent.start(&entry.hash).await,
        ItemAction::Pause => services.torrent.stop(&entry.hash).await,
        other => {
            tracing::warn!("Action {:?} does not apply to torrents", other);
            return AfterAction::Rerender;
        }
    };
    if let Err(err) = &result {
        tracing::error!("Torrent action {:?} on {} failed: {}", action, entry.name, err);
    }
    AfterAction::Reload(action.outcome(result.is_ok()))
}

async fn stream_action(action: ItemAction, entry: &StreamEntry, services: &Services) -> AfterAction {
    if action != ItemAction::Remove {
        tracing::warn!("Action {:?} does not apply to TorrServer entries", action);
        return AfterAction::Rerender;
    }
    let result = services.torrserver.remove(&entry.hash).await;
    if let Err(err) = &result {
        tracing::error!("Failed to remove {} from TorrServer: {}", entry.title, err);
    }
    AfterAction::Reload(action.outcome(result.is_ok()))
}
