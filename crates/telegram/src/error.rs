use thiserror::Error;

/// Custom error type for telegram bot operations
#[derive(Debug, Error)]
pub enum BotError {
    /// Telegram API error
    #[error("Telegram error: {0}")]
    TelegramError(#[from] teloxide::RequestError),
    /// Error from one of the external services
    #[error("Service error: {0}")]
    TorrentError(#[from] torrent::ApiError),
    /// Invalid command arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    /// Malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),
    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for bot operations
pub type BotResult<T> = Result<T, BotError>;

/// Helper trait to convert results into user-friendly messages
pub trait UserMessage {
    fn user_message(&self) -> String;
}

impl UserMessage for BotError {
    fn user_message(&self) -> String {
        match self {
            BotError::TelegramError(e) => format!("❌ Communication error: {}", e),
            BotError::TorrentError(e) => format!("❌ {}", e),
            BotError::InvalidArguments(msg) => format!("❌ {}", msg),
            BotError::Config(msg) => format!("❌ {}", msg),
            BotError::Message(msg) => format!("❌ {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let err = BotError::InvalidArguments("Missing magnet link".to_string());
        assert_eq!(err.user_message(), "❌ Missing magnet link");
        assert_eq!(err.to_string(), "Invalid arguments: Missing magnet link");

        let err = BotError::from(torrent::ApiError::InvalidLink("nope".to_string()));
        assert!(err.user_message().starts_with("❌ "));
        assert!(err.user_message().contains("nope"));
    }

    #[test]
    fn test_user_message_hides_variant_prefix() {
        let err = BotError::Message("Failed to download file: timeout".to_string());
        assert_eq!(err.user_message(), "❌ Failed to download file: timeout");

        let err = BotError::InvalidArguments("Invalid .torrent file format".to_string());
        assert!(!err.user_message().contains("Invalid arguments"));
    }
}
