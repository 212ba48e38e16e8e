//! Tracker selection (/setup)

use crate::constants::{emoji, usage};
use crate::keyboards::{self, SETUP_OK, SETUP_TRACKER_PREFIX};
use crate::session::SetupStore;
use crate::types::{HandlerResult, Services};
use std::sync::Arc;
use teloxide::{prelude::*, types::UserId};

/// Show the tracker selection keyboard
pub async fn setup(bot: Bot, msg: Message, services: Services, setup: Arc<SetupStore>) -> HandlerResult {
    let Some(user) = msg.from().map(|u| u.id) else {
        return Ok(());
    };
    send_setup_keyboard(&bot, msg.chat.id, user, &services, &setup).await
}

pub async fn send_setup_keyboard(
    bot: &Bot,
    chat_id: ChatId,
    user: UserId,
    services: &Services,
    setup: &SetupStore,
) -> HandlerResult {
    let indexers = match services.jackett.valid_indexers().await {
        Ok(indexers) => indexers,
        Err(err) => {
            tracing::error!("Error fetching indexers: {}", err);
            bot.send_message(chat_id, format!("{} Failed to load trackers", emoji::ERROR))
                .await?;
            return Ok(());
        }
    };

    bot.send_message(chat_id, usage::SETUP)
        .reply_markup(keyboards::setup_keyboard(&indexers, &setup.selected(user)))
        .await?;
    Ok(())
}

/// Handle a press on the tracker selection keyboard
///
/// Returns `false` when `data` is not a setup token.
pub async fn handle_setup_callback(
    bot: &Bot,
    q: &CallbackQuery,
    data: &str,
    services: &Services,
    setup: &SetupStore,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    let Some(message) = q.message.as_ref() else {
        return Ok(data.starts_with("setup:"));
    };

    if data == SETUP_OK {
        bot.edit_message_reply_markup(message.chat.id, message.id).await?;
        bot.send_message(message.chat.id, "Confirmed!").await?;
        return Ok(true);
    }

    let Some(tracker) = data.strip_prefix(SETUP_TRACKER_PREFIX) else {
        return Ok(false);
    };

    setup.toggle(q.from.id, tracker);
    let indexers = match services.jackett.valid_indexers().await {
        Ok(indexers) => indexers,
        Err(err) => {
            tracing::error!("Error fetching indexers: {}", err);
            return Ok(true);
        }
    };

    bot.edit_message_reply_markup(message.chat.id, message.id)
        .reply_markup(keyboards::setup_keyboard(&indexers, &setup.selected(q.from.id)))
        .await?;
    Ok(true)
}
