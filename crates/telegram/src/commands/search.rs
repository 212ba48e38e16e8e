//! Tracker search (/find and plain text)

use crate::config::BotConfig;
use crate::constants::usage;
use crate::handlers;
use crate::kinds::SearchList;
use crate::list::ListState;
use crate::session::{ActiveSession, Session, SessionStore, SetupStore};
use crate::types::{HandlerResult, MyDialogue, Services, State};
use std::sync::Arc;
use teloxide::{prelude::*, types::UserId};

/// Search right away, or ask for the query when none was given
#[allow(clippy::too_many_arguments)]
pub async fn find(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    query: String,
    services: Services,
    sessions: Arc<SessionStore>,
    setup: Arc<SetupStore>,
    config: Arc<BotConfig>,
) -> HandlerResult {
    let query = query.trim();
    if query.is_empty() {
        bot.send_message(msg.chat.id, usage::FIND).await?;
        dialogue.update(State::AwaitQuery).await?;
        return Ok(());
    }

    dialogue.exit().await?;
    let Some(user) = msg.from().map(|u| u.id) else {
        return Ok(());
    };
    run_search(&bot, msg.chat.id, user, query, &services, &sessions, &setup, &config).await
}

/// Treat a plain text message as a search query
#[allow(clippy::too_many_arguments)]
pub async fn search_text(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    services: Services,
    sessions: Arc<SessionStore>,
    setup: Arc<SetupStore>,
    config: Arc<BotConfig>,
) -> HandlerResult {
    let text = msg
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.starts_with('/'))
        .map(str::to_string);
    let Some(text) = text else {
        return super::invalid_state(bot, msg).await;
    };

    dialogue.exit().await?;
    let Some(user) = msg.from().map(|u| u.id) else {
        return Ok(());
    };
    run_search(&bot, msg.chat.id, user, &text, &services, &sessions, &setup, &config).await
}

/// Query Jackett with the user's trackers and open the result list
#[allow(clippy::too_many_arguments)]
pub async fn run_search(
    bot: &Bot,
    chat_id: ChatId,
    user: UserId,
    query: &str,
    services: &Services,
    sessions: &SessionStore,
    setup: &SetupStore,
    config: &BotConfig,
) -> HandlerResult {
    let kind = SearchList::new(services.jackett.clone(), query, setup.trackers(user));
    let mut list = ListState::new(kind, config.page_size);
    list.reload().await;
    tracing::info!("{}, {}, found: {}", user.0, query, list.len());

    if list.is_empty() {
        sessions.remove(chat_id);
        bot.send_message(chat_id, "Nothing found...").await?;
        return Ok(());
    }

    let shared = sessions.insert(chat_id, ActiveSession::new(Session::Search(list)));
    let mut session = shared.lock().await;
    handlers::send_page(bot, chat_id, &mut session).await
}
