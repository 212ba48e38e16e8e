//! TorrServer catalog command (/lsts)

use crate::config::BotConfig;
use crate::handlers;
use crate::kinds::StreamList;
use crate::list::ListState;
use crate::session::{Session, SessionStore};
use crate::types::{HandlerResult, Services};
use std::sync::Arc;
use teloxide::prelude::*;

/// Browse the streaming server catalog
pub async fn lsts(
    bot: Bot,
    msg: Message,
    services: Services,
    sessions: Arc<SessionStore>,
    config: Arc<BotConfig>,
) -> HandlerResult {
    let list = ListState::new(StreamList::new(services.torrserver.clone()), config.page_size);
    handlers::open_list(&bot, msg.chat.id, &sessions, Session::Stream(list)).await
}
