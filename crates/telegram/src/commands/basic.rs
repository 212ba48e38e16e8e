//! Basic bot commands (start, help, cancel)

use crate::session::SessionStore;
use crate::types::{Command, HandlerResult, MyDialogue};
use std::sync::Arc;
use teloxide::{prelude::*, utils::command::BotCommands};

/// Welcome message when user starts the bot
pub async fn start(bot: Bot, msg: Message) -> HandlerResult {
    let welcome_text = "👋 Welcome to torrbot!\n\n\
        Send me any text to search the trackers.\n\n\
        🎯 Quick Actions:\n\
        • /find - Search the trackers\n\
        • /list - Torrents in the client\n\
        • /lsts - TorrServer catalog\n\
        • /setup - Choose trackers\n\
        • /help - See all commands";

    bot.send_message(msg.chat.id, welcome_text)
        .reply_markup(crate::keyboards::main_menu_keyboard())
        .await?;
    Ok(())
}

/// Display help message with available commands
pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

/// Cancel the current operation, reset dialogue state and end the session
pub async fn cancel(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    sessions: Arc<SessionStore>,
) -> HandlerResult {
    if sessions.remove(msg.chat.id) {
        tracing::debug!("Session of chat {} ended", msg.chat.id.0);
    }
    bot.send_message(msg.chat.id, "Operation cancelled.").await?;
    dialogue.exit().await?;
    Ok(())
}

/// Handle invalid state
pub async fn invalid_state(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "Unable to handle the message. Type /help to see the usage.",
    )
    .await?;
    Ok(())
}
