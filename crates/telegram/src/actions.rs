//! Actions offered for a selected list item

use torrent::{SearchHit, StreamEntry, TorrentEntry, TorrentStatus};

const ACTION_PREFIX: &str = "act:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    /// Add a search hit to the torrent client
    Download,
    /// Add a search hit to the streaming server
    TorrServer,
    /// Send the `.torrent` file of a search hit
    SendFile,
    SendMagnet,
    /// Send the details page URL of a search hit
    OpenPage,
    Start,
    Pause,
    Remove,
    /// Close the action menu without doing anything
    Return,
}

impl ItemAction {
    const ALL: [ItemAction; 9] = [
        ItemAction::Download,
        ItemAction::TorrServer,
        ItemAction::SendFile,
        ItemAction::SendMagnet,
        ItemAction::OpenPage,
        ItemAction::Start,
        ItemAction::Pause,
        ItemAction::Remove,
        ItemAction::Return,
    ];

    fn name(self) -> &'static str {
        match self {
            ItemAction::Download => "download",
            ItemAction::TorrServer => "torrserver",
            ItemAction::SendFile => "file",
            ItemAction::SendMagnet => "magnet",
            ItemAction::OpenPage => "page",
            ItemAction::Start => "start",
            ItemAction::Pause => "pause",
            ItemAction::Remove => "remove",
            ItemAction::Return => "return",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemAction::Download => "download",
            ItemAction::TorrServer => "torrsrv",
            ItemAction::SendFile => ".torrent",
            ItemAction::SendMagnet => "magnet",
            ItemAction::OpenPage => "web page",
            ItemAction::Start => "Start",
            ItemAction::Pause => "Pause",
            ItemAction::Remove => "Remove",
            ItemAction::Return => "⬆",
        }
    }

    pub fn token(self) -> String {
        format!("{}{}", ACTION_PREFIX, self.name())
    }

    pub fn parse(token: &str) -> Option<Self> {
        let name = token.strip_prefix(ACTION_PREFIX)?;
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Status text reported after the action ran
    pub fn outcome(self, ok: bool) -> String {
        if !ok {
            return format!("failed {}", self.name());
        }
        match self {
            ItemAction::Download => "added to client".to_string(),
            ItemAction::TorrServer => "added to torrserver".to_string(),
            ItemAction::Start => "started".to_string(),
            ItemAction::Pause => "paused".to_string(),
            ItemAction::Remove => "removed".to_string(),
            _ => "done".to_string(),
        }
    }

    /// Action rows for a search hit
    pub fn for_hit(hit: &SearchHit) -> Vec<Vec<ItemAction>> {
        let mut extra = Vec::new();
        if hit.link.is_some() {
            extra.push(ItemAction::SendFile);
        }
        if hit.magnet_uri.is_some() {
            extra.push(ItemAction::SendMagnet);
        }
        if hit.details.is_some() {
            extra.push(ItemAction::OpenPage);
        }
        vec![
            vec![ItemAction::Download, ItemAction::TorrServer, ItemAction::Return],
            extra,
        ]
    }

    /// Action row for a torrent, depending on its status
    pub fn for_torrent(entry: &TorrentEntry) -> Vec<Vec<ItemAction>> {
        let mut row = vec![ItemAction::Remove];
        if entry.status == TorrentStatus::Stopped {
            row.push(ItemAction::Start);
        }
        if entry.status.is_active() {
            row.push(ItemAction::Pause);
        }
        row.push(ItemAction::Return);
        vec![row]
    }

    pub fn for_stream(_entry: &StreamEntry) -> Vec<Vec<ItemAction>> {
        vec![vec![ItemAction::Remove, ItemAction::Return]]
    }
}
