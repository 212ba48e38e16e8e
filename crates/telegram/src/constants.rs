//! Constants used throughout the telegram bot

/// Items per page when `PAGE_SIZE` is not configured
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Telegram rejects callback data longer than this many bytes
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// Largest `.torrent` document accepted from a chat
pub const MAX_TORRENT_FILE_SIZE: u32 = 10 * 1024 * 1024;

/// Emoji constants for consistent UI
pub mod emoji {
    pub const SUCCESS: &str = "✅";
    pub const ERROR: &str = "❌";
    pub const FOLDER: &str = "📁";
    pub const DOWNLOAD: &str = "📥";
    pub const SEARCH: &str = "🔍";
    pub const STREAM: &str = "📺";
    pub const VIDEO: &str = "🎬";
    pub const MUSIC: &str = "🎧";
    pub const FILE: &str = "📄";
    pub const SELECTED: &str = "✅";
    pub const UNSELECTED: &str = "🟩";
}

/// Usage messages for commands
pub mod usage {
    pub const FIND: &str = "Send me what to search for.\n\nTip: /find <text> searches right away.";
    pub const MAGNET: &str = "Send me a magnet link, a torrent URL or a .torrent file.";
    pub const SETUP: &str = "Choose the trackers to search:";
}
