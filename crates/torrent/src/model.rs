//! Typed records returned by the external services

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treat an empty string as an absent link
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// One result of a Jackett search
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchHit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seeders: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub peers: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracker_id: String,
    /// Direct `.torrent` download link (usually proxied by Jackett)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub magnet_uri: Option<String>,
    /// Tracker details page
    #[serde(default, deserialize_with = "empty_as_none")]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub poster: Option<String>,
}

impl SearchHit {
    /// Link handed to services that accept either a URL or a magnet
    pub fn link_or_magnet(&self) -> Option<&str> {
        self.link.as_deref().or(self.magnet_uri.as_deref())
    }
}

/// Jackett search response envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// A Jackett indexer (tracker) as listed by the admin API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Indexer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub configured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_error: String,
}

impl Indexer {
    /// Configured and not reporting an error
    pub fn is_usable(&self) -> bool {
        self.configured && self.last_error.is_empty()
    }
}

/// Coarse torrent status used for display and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorrentStatus {
    Downloading,
    Seeding,
    Stopped,
    Checking,
    Queued,
    Error,
    Unknown,
}

impl TorrentStatus {
    /// Map a qBittorrent state name (`stalledUP`, `pausedDL`, `StoppedUP`, ...)
    pub fn from_state_name(state: &str) -> Self {
        let lower = state.to_ascii_lowercase();
        if lower.starts_with("paused") || lower.starts_with("stopped") {
            TorrentStatus::Stopped
        } else if lower.starts_with("checking") || lower == "allocating" || lower == "moving" {
            TorrentStatus::Checking
        } else if lower.starts_with("queued") {
            TorrentStatus::Queued
        } else if lower == "error" || lower == "missingfiles" {
            TorrentStatus::Error
        } else if lower == "uploading" || lower.ends_with("up") {
            TorrentStatus::Seeding
        } else if lower == "downloading" || lower.ends_with("dl") {
            TorrentStatus::Downloading
        } else {
            TorrentStatus::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TorrentStatus::Downloading => "downloading",
            TorrentStatus::Seeding => "seeding",
            TorrentStatus::Stopped => "stopped",
            TorrentStatus::Checking => "checking",
            TorrentStatus::Queued => "queued",
            TorrentStatus::Error => "error",
            TorrentStatus::Unknown => "unknown",
        }
    }

    /// Whether the torrent is transferring and can be paused
    pub fn is_active(&self) -> bool {
        matches!(self, TorrentStatus::Downloading | TorrentStatus::Seeding)
    }
}

impl fmt::Display for TorrentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A torrent known to the torrent client
#[derive(Debug, Clone, PartialEq)]
pub struct TorrentEntry {
    /// Info hash, used as the torrent id
    pub hash: String,
    pub name: String,
    /// Completion fraction in `0.0..=1.0`
    pub progress: f64,
    pub status: TorrentStatus,
    /// Total size in bytes
    pub size: u64,
    pub ratio: f64,
    pub added: Option<DateTime<Utc>>,
    pub file_count: usize,
    /// Most frequent file extension among the torrent's files
    pub ext: String,
}

impl TorrentEntry {
    pub fn is_dir(&self) -> bool {
        self.file_count > 1
    }
}

/// An entry of the streaming server catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "torrent_size", default, deserialize_with = "null_as_default")]
    pub size: u64,
    pub hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hit_from_jackett_json() {
        let json = r#"{
            "Results": [
                {
                    "Title": "Some.Movie.2024.1080p",
                    "Size": 2147483648,
                    "Seeders": 12,
                    "Peers": 3,
                    "TrackerId": "rutracker",
                    "Link": "http://jackett/dl/rutracker/?jackett_apikey=x&path=y",
                    "MagnetUri": null,
                    "Details": "https://rutracker.org/forum/viewtopic.php?t=1",
                    "Poster": ""
                },
                {
                    "Title": "Other",
                    "Size": 100,
                    "Seeders": null,
                    "Peers": null,
                    "TrackerId": "1337x",
                    "MagnetUri": "magnet:?xt=urn:btih:abc"
                }
            ]
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 2);

        let first = &resp.results[0];
        assert_eq!(first.title, "Some.Movie.2024.1080p");
        assert_eq!(first.size, 2147483648);
        assert_eq!(first.seeders, 12);
        assert_eq!(first.tracker_id, "rutracker");
        assert!(first.magnet_uri.is_none());
        // Empty poster string is treated as missing
        assert!(first.poster.is_none());
        assert!(first.link_or_magnet().unwrap().starts_with("http://jackett"));

        let second = &resp.results[1];
        assert_eq!(second.seeders, 0);
        assert_eq!(second.peers, 0);
        assert!(second.link.is_none());
        assert_eq!(second.link_or_magnet(), Some("magnet:?xt=urn:btih:abc"));
    }

    #[test]
    fn test_indexer_is_usable() {
        let json = r#"[
            {"id": "a", "name": "A", "configured": true, "last_error": ""},
            {"id": "b", "name": "B", "configured": true, "last_error": "timeout"},
            {"id": "c", "name": "C", "configured": false, "last_error": null}
        ]"#;
        let indexers: Vec<Indexer> = serde_json::from_str(json).unwrap();
        let usable: Vec<_> = indexers.iter().filter(|i| i.is_usable()).map(|i| i.id.as_str()).collect();
        assert_eq!(usable, vec!["a"]);
    }

    #[test]
    fn test_status_from_state_name() {
        assert_eq!(TorrentStatus::from_state_name("downloading"), TorrentStatus::Downloading);
        assert_eq!(TorrentStatus::from_state_name("stalledDL"), TorrentStatus::Downloading);
        assert_eq!(TorrentStatus::from_state_name("metaDL"), TorrentStatus::Downloading);
        assert_eq!(TorrentStatus::from_state_name("forcedDL"), TorrentStatus::Downloading);
        assert_eq!(TorrentStatus::from_state_name("uploading"), TorrentStatus::Seeding);
        assert_eq!(TorrentStatus::from_state_name("StalledUP"), TorrentStatus::Seeding);
        assert_eq!(TorrentStatus::from_state_name("pausedUP"), TorrentStatus::Stopped);
        assert_eq!(TorrentStatus::from_state_name("StoppedDL"), TorrentStatus::Stopped);
        assert_eq!(TorrentStatus::from_state_name("checkingUP"), TorrentStatus::Checking);
        assert_eq!(TorrentStatus::from_state_name("CheckingResumeData"), TorrentStatus::Checking);
        assert_eq!(TorrentStatus::from_state_name("queuedDL"), TorrentStatus::Queued);
        assert_eq!(TorrentStatus::from_state_name("MissingFiles"), TorrentStatus::Error);
        assert_eq!(TorrentStatus::from_state_name("Unknown"), TorrentStatus::Unknown);
    }

    #[test]
    fn test_status_display_and_activity() {
        assert_eq!(TorrentStatus::Seeding.to_string(), "seeding");
        assert!(TorrentStatus::Downloading.is_active());
        assert!(TorrentStatus::Seeding.is_active());
        assert!(!TorrentStatus::Stopped.is_active());
    }

    #[test]
    fn test_stream_entry_from_torrserver_json() {
        let json = r#"[
            {"title": "Film", "hash": "aaa", "torrent_size": 1024, "stat": 5},
            {"title": "No size yet", "hash": "bbb"}
        ]"#;
        let entries: Vec<StreamEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].size, 1024);
        assert_eq!(entries[1].size, 0);
        assert_eq!(entries[1].hash, "bbb");
    }
}
