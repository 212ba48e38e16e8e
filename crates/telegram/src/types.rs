use teloxide::{
    dispatching::dialogue::{Dialogue, InMemStorage},
    macros::BotCommands,
};
use torrent::{JackettApi, TorrServerApi, TorrentApi};

/// Type alias for dialogue management with State and InMemStorage
pub type MyDialogue = Dialogue<State, InMemStorage<State>>;

/// Type alias for handler result types
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Represents the dialogue state for the bot conversation
#[derive(Clone, Default, Debug)]
pub enum State {
    /// Initial state when conversation starts
    #[default]
    Start,
    /// Waiting for a search query after a bare /find
    AwaitQuery,
    /// State when waiting for magnet link input
    GetMagnet,
}

/// Clients of the external services, shared by every handler
#[derive(Clone)]
pub struct Services {
    pub torrent: TorrentApi,
    pub jackett: JackettApi,
    pub torrserver: TorrServerApi,
}

/// Available bot commands
#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Welcome message and menu")]
    Start,
    #[command(description = "Display help information")]
    Help,
    #[command(description = "Search the trackers")]
    Find(String),
    #[command(description = "Browse torrents in the torrent client")]
    List,
    #[command(description = "Browse the TorrServer catalog")]
    Lsts,
    #[command(description = "Add a torrent via magnet link, URL or .torrent file")]
    Magnet,
    #[command(description = "Choose the trackers to search")]
    Setup,
    #[command(description = "Cancel the current operation")]
    Cancel,
}
