//! Per-chat browsing sessions and per-user tracker setup
//!
//! Each chat has at most one active list. The store only guards the map
//! itself; the session behind it sits in an async mutex so that handlers
//! for the same chat mutate it one at a time while other chats proceed
//! independently.

use crate::actions::ItemAction;
use crate::kinds::{SearchList, StreamList, TorrentList};
use crate::list::{ListCommand, ListEvent, ListState, RenderedPage};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};
use teloxide::types::{ChatId, MessageId, UserId};
use tokio::sync::Mutex;

/// A list of one of the browsable kinds
pub enum Session {
    Search(ListState<SearchList>),
    Torrents(ListState<TorrentList>),
    Stream(ListState<StreamList>),
}

/// Run the same expression against whichever list the session holds
macro_rules! with_list {
    ($session:expr, $list:ident => $body:expr) => {
        match $session {
            Session::Search($list) => $body,
            Session::Torrents($list) => $body,
            Session::Stream($list) => $body,
        }
    };
}

impl Session {
    pub async fn apply(&mut self, command: ListCommand) -> ListEvent {
        with_list!(self, list => list.apply(command).await)
    }

    pub async fn reload(&mut self) -> bool {
        with_list!(self, list => list.reload().await)
    }

    pub fn render_if_changed(&self) -> Option<RenderedPage> {
        with_list!(self, list => list.render_if_changed())
    }

    pub fn mark_delivered(&mut self, page: &RenderedPage) {
        with_list!(self, list => list.mark_delivered(page))
    }

    pub fn invalidate(&mut self) {
        with_list!(self, list => list.invalidate())
    }

    pub fn selected_index(&self) -> Option<usize> {
        with_list!(self, list => list.selected_index())
    }

    pub fn clear_selection(&mut self) {
        with_list!(self, list => list.clear_selection())
    }

    pub fn render_selected(&self) -> Option<String> {
        with_list!(self, list => list.render_selected())
    }

    /// Actions available for the selected item
    pub fn selected_actions(&self) -> Option<Vec<Vec<ItemAction>>> {
        match self {
            Session::Search(list) => list.selected().map(ItemAction::for_hit),
            Session::Torrents(list) => list.selected().map(ItemAction::for_torrent),
            Session::Stream(list) => list.selected().map(ItemAction::for_stream),
        }
    }
}

/// The active list of a chat and the messages showing it
pub struct ActiveSession {
    pub list: Session,
    /// Message holding the rendered page
    pub list_message: Option<MessageId>,
    /// Message holding the action menu of the selected item
    pub action_message: Option<MessageId>,
}

impl ActiveSession {
    pub fn new(list: Session) -> Self {
        Self {
            list,
            list_message: None,
            action_message: None,
        }
    }
}

pub type SharedSession = Arc<Mutex<ActiveSession>>;

/// Active sessions keyed by chat
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<ChatId, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `chat`, replacing any previous one
    pub fn insert(&self, chat: ChatId, session: ActiveSession) -> SharedSession {
        let shared = Arc::new(Mutex::new(session));
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        if sessions.insert(chat, shared.clone()).is_some() {
            tracing::debug!("Replaced session of chat {}", chat.0);
        }
        shared
    }

    pub fn get(&self, chat: ChatId) -> Option<SharedSession> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(&chat).cloned()
    }

    /// End the session of `chat`; returns whether there was one
    pub fn remove(&self, chat: ChatId) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.remove(&chat).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trackers each user restricts searches to
#[derive(Default)]
pub struct SetupStore {
    trackers: RwLock<HashMap<UserId, BTreeSet<String>>>,
}

impl SetupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove one tracker from the user's selection
    pub fn toggle(&self, user: UserId, tracker: &str) {
        let mut trackers = self.trackers.write().unwrap_or_else(|e| e.into_inner());
        let selection = trackers.entry(user).or_default();
        if !selection.remove(tracker) {
            selection.insert(tracker.to_string());
        }
    }

    /// The user's selection; empty means every tracker
    pub fn selected(&self, user: UserId) -> BTreeSet<String> {
        let trackers = self.trackers.read().unwrap_or_else(|e| e.into_inner());
        trackers.get(&user).cloned().unwrap_or_default()
    }

    pub fn trackers(&self, user: UserId) -> Vec<String> {
        self.selected(user).into_iter().collect()
    }
}
