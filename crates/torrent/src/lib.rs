//! Clients for the services the bot drives
//!
//! This crate provides simplified interfaces to the qBittorrent Web API
//! (via the qbit-rs library), the Jackett search aggregator and the
//! TorrServer streaming server. It handles authentication, error logging
//! and converts service responses into the typed records in [`model`].

pub mod error;
pub mod jackett;
pub mod model;
pub mod torrent;
pub mod torrserver;
pub mod utils;

pub use error::{ApiError, ApiResult};
pub use jackett::JackettApi;
pub use model::{Indexer, SearchHit, StreamEntry, TorrentEntry, TorrentStatus};
pub use torrent::TorrentApi;
pub use torrserver::TorrServerApi;
