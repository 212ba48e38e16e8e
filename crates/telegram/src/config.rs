//! Bot settings read from the environment

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::error::{BotError, BotResult};
use std::collections::HashSet;
use teloxide::types::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Users allowed to talk to the bot; empty means nobody
    pub allowed_users: HashSet<UserId>,
    /// Items per list page
    pub page_size: usize,
}

impl BotConfig {
    /// Read `ALLOWED_USERS` and `PAGE_SIZE`
    pub fn from_env() -> BotResult<Self> {
        let allowed_users = parse_allowed_users(&std::env::var("ALLOWED_USERS").unwrap_or_default())?;
        let page_size = match std::env::var("PAGE_SIZE") {
            Ok(value) => parse_page_size(&value)?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        if allowed_users.is_empty() {
            tracing::warn!("ALLOWED_USERS is empty, every user will be rejected");
        }

        Ok(Self {
            allowed_users,
            page_size,
        })
    }

    pub fn is_allowed(&self, user: UserId) -> bool {
        self.allowed_users.contains(&user)
    }
}

/// Parse a comma separated list of numeric user ids
pub fn parse_allowed_users(value: &str) -> BotResult<HashSet<UserId>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<u64>()
                .map(UserId)
                .map_err(|_| BotError::Config(format!("ALLOWED_USERS: invalid user id {:?}", id)))
        })
        .collect()
}

pub fn parse_page_size(value: &str) -> BotResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(BotError::Config(format!(
            "PAGE_SIZE must be a positive number, got {:?}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_users() {
        let users = parse_allowed_users("123, 456,,789 ").unwrap();
        assert_eq!(users.len(), 3);
        assert!(users.contains(&UserId(456)));

        assert!(parse_allowed_users("").unwrap().is_empty());
        assert!(parse_allowed_users("12,abc").is_err());
        assert!(parse_allowed_users("-5").is_err());
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("5").unwrap(), 5);
        assert_eq!(parse_page_size(" 8 ").unwrap(), 8);
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("many").is_err());
    }

    #[test]
    fn test_is_allowed() {
        let config = BotConfig {
            allowed_users: parse_allowed_users("1,2").unwrap(),
            page_size: DEFAULT_PAGE_SIZE,
        };
        assert!(config.is_allowed(UserId(1)));
        assert!(!config.is_allowed(UserId(3)));
    }
}
