//! Authorization of incoming updates

use crate::config::BotConfig;
use std::sync::Arc;
use teloxide::types::{CallbackQuery, Message, UserId};

/// Whether `user` may use the bot; unknown users are logged
pub fn allow(config: &BotConfig, user: Option<UserId>) -> bool {
    match user {
        Some(user) if config.is_allowed(user) => true,
        Some(user) => {
            tracing::info!("unknown user {}", user.0);
            false
        }
        None => false,
    }
}

/// `dptree` filter for messages
pub fn message_allowed(msg: Message, config: Arc<BotConfig>) -> bool {
    allow(&config, msg.from().map(|user| user.id))
}

/// `dptree` filter for callback queries
pub fn callback_allowed(q: CallbackQuery, config: Arc<BotConfig>) -> bool {
    allow(&config, Some(q.from.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_allowed_users;

    #[test]
    fn test_allow() {
        let config = BotConfig {
            allowed_users: parse_allowed_users("10").unwrap(),
            page_size: 5,
        };
        assert!(allow(&config, Some(UserId(10))));
        assert!(!allow(&config, Some(UserId(11))));
        assert!(!allow(&config, None));
    }

    #[test]
    fn test_empty_list_allows_nobody() {
        let config = BotConfig {
            allowed_users: Default::default(),
            page_size: 5,
        };
        assert!(!allow(&config, Some(UserId(10))));
    }
}
