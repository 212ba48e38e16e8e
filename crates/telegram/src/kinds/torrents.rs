use crate::constants::emoji;
use crate::list::{ListKind, SortDirection, SortField, SortValue};
use crate::utils;
use teloxide::utils::html;
use torrent::{ApiResult, TorrentApi, TorrentEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorrentField {
    Date,
    Name,
    Size,
    Dir,
    Ratio,
}

impl SortField for TorrentField {
    const ALL: &'static [Self] = &[
        TorrentField::Date,
        TorrentField::Name,
        TorrentField::Size,
        TorrentField::Dir,
        TorrentField::Ratio,
    ];

    fn key(self) -> &'static str {
        match self {
            TorrentField::Date => "date",
            TorrentField::Name => "name",
            TorrentField::Size => "size",
            TorrentField::Dir => "dir",
            TorrentField::Ratio => "r",
        }
    }
}

/// Torrents known to the torrent client
pub struct TorrentList {
    torrent: TorrentApi,
}

impl TorrentList {
    pub fn new(torrent: TorrentApi) -> Self {
        Self { torrent }
    }
}

impl ListKind for TorrentList {
    type Item = TorrentEntry;
    type Field = TorrentField;
    const RELOADABLE: bool = true;

    async fn fetch(&self) -> ApiResult<Vec<TorrentEntry>> {
        self.torrent.list_torrents().await
    }

    fn default_sort(&self) -> Vec<(TorrentField, SortDirection)> {
        vec![(TorrentField::Date, SortDirection::Descending)]
    }

    fn sort_value(entry: &TorrentEntry, field: TorrentField) -> SortValue {
        match field {
            TorrentField::Date => entry.added.into(),
            TorrentField::Name => entry.name.as_str().into(),
            TorrentField::Size => entry.size.into(),
            TorrentField::Dir => entry.is_dir().into(),
            TorrentField::Ratio => entry.ratio.into(),
        }
    }

    fn bucket(&self, entry: &TorrentEntry) -> Option<String> {
        Some(entry.status.to_string())
    }

    fn item_line(&self, index: usize, entry: &TorrentEntry) -> String {
        let mut fragments = Vec::new();
        if !entry.name.is_empty() {
            fragments.push(html::escape(&entry.name));
        }
        if entry.size > 0 {
            fragments.push(format!("[{}]", utils::format_size(entry.size)));
        }
        if entry.progress > 0.0 {
            fragments.push(format!("[{}]", utils::format_percent(entry.progress)));
        }
        fragments.push(format!("[{}]", entry.status));
        if entry.ratio > 0.0 {
            fragments.push(format!("R[{:.2}]", entry.ratio));
        }

        let dir = if entry.is_dir() { emoji::FOLDER } else { "" };
        format!(
            "<b>{}</b>. {}{}{}",
            index + 1,
            dir,
            utils::ext_icon(&entry.ext),
            fragments.join(" ")
        )
    }

    fn footer(&self, entries: &[&TorrentEntry]) -> Option<String> {
        let download: u64 = entries.iter().map(|e| e.size).sum();
        let upload: f64 = entries.iter().map(|e| e.size as f64 * e.ratio).sum();
        Some(format!(
            "<b>download: {} upload: {}</b>",
            utils::format_size(download),
            utils::format_size(upload as u64)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListState;
    use chrono::{TimeZone, Utc};
    use torrent::TorrentStatus;

    fn entry(name: &str, added: i64, status: TorrentStatus) -> TorrentEntry {
        TorrentEntry {
            hash: format!("hash-{}", name),
            name: name.to_string(),
            progress: 0.5,
            status,
            size: 2048,
            ratio: 1.5,
            added: Utc.timestamp_opt(added, 0).single(),
            file_count: 1,
            ext: "mkv".to_string(),
        }
    }

    fn torrent_list() -> TorrentList {
        TorrentList::new(TorrentApi::new(
            "http://localhost:8080",
            "admin".to_string(),
            "admin".to_string(),
        ))
    }

    #[test]
    fn test_item_line_full() {
        let line = torrent_list().item_line(0, &entry("Film", 0, TorrentStatus::Seeding));
        assert_eq!(line, "<b>1</b>. 🎬Film [2.00 KB] [50.0%] [seeding] R[1.50]");
    }

    #[test]
    fn test_item_line_omits_falsy_fields() {
        let mut e = entry("Album", 0, TorrentStatus::Stopped);
        e.progress = 0.0;
        e.ratio = 0.0;
        e.size = 0;
        e.file_count = 12;
        e.ext = "mp3".to_string();
        let line = torrent_list().item_line(4, &e);
        assert_eq!(line, "<b>5</b>. 📁🎧Album [stopped]");
    }

    #[test]
    fn test_default_sort_newest_first() {
        let mut list = ListState::new(torrent_list(), 5);
        list.set_items(vec![
            entry("old", 100, TorrentStatus::Seeding),
            entry("new", 300, TorrentStatus::Seeding),
            entry("mid", 200, TorrentStatus::Seeding),
        ]);
        let names: Vec<_> = list.items().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_status_filter() {
        let mut list = ListState::new(torrent_list(), 5);
        list.set_items(vec![
            entry("a", 3, TorrentStatus::Seeding),
            entry("b", 2, TorrentStatus::Stopped),
            entry("c", 1, TorrentStatus::Downloading),
        ]);
        list.toggle_filter("stopped");
        assert_eq!(list.classify(), vec!["seeding", "stopped", "downloading"]);
        let names: Vec<_> = list.items().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b"]);
    }

    #[test]
    fn test_footer_sums_filtered_items() {
        let kind = torrent_list();
        let a = entry("a", 0, TorrentStatus::Seeding);
        let b = entry("b", 0, TorrentStatus::Seeding);
        let footer = kind.footer(&[&a, &b]).unwrap_or_default();
        assert_eq!(footer, "<b>download: 4.00 KB upload: 6.00 KB</b>");
    }
}
