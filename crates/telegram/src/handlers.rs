//! Handler helper functions
//!
//! Delivery of list pages and action menus to a chat. Pages are only sent
//! or edited when their content changed since the last successful delivery.

use crate::error::{BotError, UserMessage};
use crate::keyboards;
use crate::session::{ActiveSession, Session, SessionStore};
use crate::types::HandlerResult;
use teloxide::{prelude::*, types::ParseMode, ApiError, RequestError};

/// Send a formatted message with emoji prefix
pub async fn send_response(bot: &Bot, chat_id: ChatId, emoji: &str, message: &str) -> HandlerResult {
    bot.send_message(chat_id, format!("{} {}", emoji, message))
        .await?;
    Ok(())
}

/// Report a failure to the chat in user-facing wording
pub async fn send_error(bot: &Bot, chat_id: ChatId, err: &BotError) -> HandlerResult {
    tracing::warn!("Reporting error to chat {}: {}", chat_id.0, err);
    bot.send_message(chat_id, err.user_message()).await?;
    Ok(())
}

/// Send the current page as a new message and make it the list message
pub async fn send_page(bot: &Bot, chat_id: ChatId, session: &mut ActiveSession) -> HandlerResult {
    session.list.invalidate();
    let Some(page) = session.list.render_if_changed() else {
        return Ok(());
    };

    let sent = bot
        .send_message(chat_id, page.text.clone())
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::page_markup(&page))
        .await?;
    session.list_message = Some(sent.id);
    session.list.mark_delivered(&page);
    Ok(())
}

/// Load a list and show it as the chat's new session
pub async fn open_list(bot: &Bot, chat_id: ChatId, sessions: &SessionStore, mut list: Session) -> HandlerResult {
    list.reload().await;
    let shared = sessions.insert(chat_id, ActiveSession::new(list));
    let mut session = shared.lock().await;
    send_page(bot, chat_id, &mut session).await
}

/// Bring the list message up to date, editing it in place
pub async fn refresh_page(bot: &Bot, chat_id: ChatId, session: &mut ActiveSession) -> HandlerResult {
    let Some(message_id) = session.list_message else {
        return send_page(bot, chat_id, session).await;
    };
    let Some(page) = session.list.render_if_changed() else {
        tracing::debug!("Page unchanged, skipping edit");
        return Ok(());
    };

    let result = bot
        .edit_message_text(chat_id, message_id, page.text.clone())
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::page_markup(&page))
        .await;

    match result {
        Ok(_) => {}
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            tracing::debug!("Message not modified");
        }
        Err(err) => {
            tracing::warn!("Failed to update list message: {}", err);
            return Err(err.into());
        }
    }
    session.list.mark_delivered(&page);
    Ok(())
}

/// Send the action menu for the selected item
pub async fn show_action_menu(bot: &Bot, chat_id: ChatId, session: &mut ActiveSession) -> HandlerResult {
    let (Some(line), Some(actions)) = (session.list.render_selected(), session.list.selected_actions()) else {
        return Ok(());
    };

    let sent = bot
        .send_message(chat_id, line)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::actions_keyboard(&actions))
        .await?;
    session.action_message = Some(sent.id);
    Ok(())
}

/// Clear the selection and delete the action menu, if any
pub async fn close_action_menu(bot: &Bot, chat_id: ChatId, session: &mut ActiveSession) {
    session.list.clear_selection();
    if let Some(message_id) = session.action_message.take() {
        if let Err(err) = bot.delete_message(chat_id, message_id).await {
            tracing::warn!("Failed to delete action menu: {}", err);
        }
    }
}
