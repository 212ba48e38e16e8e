//! Command handlers for the Telegram bot
//!
//! This module contains all command handler functions organized by category:
//! - `basic`: Start, help, cancel
//! - `search`: Tracker search via /find or plain text
//! - `torrent`: Torrent client list and magnet upload
//! - `stream`: TorrServer catalog
//! - `setup`: Tracker selection

mod basic;
mod search;
mod setup;
mod stream;
mod torrent;

pub use basic::*;
pub use search::*;
pub use setup::*;
pub use stream::*;
pub use torrent::*;
