//! The list kinds the bot can browse
//!
//! Each kind supplies its item source, sort keys, filter field and line
//! format to the generic [`ListState`](crate::list::ListState).

mod search;
mod stream;
mod torrents;

pub use search::{SearchField, SearchList};
pub use stream::StreamList;
pub use torrents::{TorrentField, TorrentList};
