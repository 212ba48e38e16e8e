use crate::list::{ListKind, SortDirection, SortField, SortValue};
use crate::utils;
use std::collections::HashSet;
use teloxide::utils::html;
use torrent::{ApiResult, JackettApi, SearchHit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Size,
    Seeders,
    Peers,
    Link,
}

impl SortField for SearchField {
    const ALL: &'static [Self] = &[
        SearchField::Size,
        SearchField::Seeders,
        SearchField::Peers,
        SearchField::Link,
    ];

    fn key(self) -> &'static str {
        match self {
            SearchField::Size => "size",
            SearchField::Seeders => "seeds",
            SearchField::Peers => "peers",
            SearchField::Link => "lnk",
        }
    }
}

/// Results of one Jackett search
pub struct SearchList {
    jackett: JackettApi,
    query: String,
    trackers: Vec<String>,
    downloaded: HashSet<String>,
    streamed: HashSet<String>,
}

impl SearchList {
    pub fn new(jackett: JackettApi, query: impl Into<String>, trackers: Vec<String>) -> Self {
        Self {
            jackett,
            query: query.into(),
            trackers,
            downloaded: HashSet::new(),
            streamed: HashSet::new(),
        }
    }

    /// Mark a hit as sent to the torrent client
    pub fn mark_downloaded(&mut self, hit: &SearchHit) {
        self.downloaded.insert(mark_key(hit));
    }

    /// Mark a hit as sent to the streaming server
    pub fn mark_streamed(&mut self, hit: &SearchHit) {
        self.streamed.insert(mark_key(hit));
    }
}

fn mark_key(hit: &SearchHit) -> String {
    hit.link_or_magnet().unwrap_or(&hit.title).to_string()
}

impl ListKind for SearchList {
    type Item = SearchHit;
    type Field = SearchField;
    const RELOADABLE: bool = true;

    async fn fetch(&self) -> ApiResult<Vec<SearchHit>> {
        let hits = self.jackett.query(&self.query, &self.trackers).await?;
        let total = hits.len();
        let alive: Vec<SearchHit> = hits
            .into_iter()
            .filter(|hit| hit.seeders > 0 || hit.peers > 0)
            .collect();
        tracing::debug!("Search {:?}: {} of {} hits alive", self.query, alive.len(), total);
        Ok(alive)
    }

    fn default_sort(&self) -> Vec<(SearchField, SortDirection)> {
        vec![
            (SearchField::Size, SortDirection::Descending),
            (SearchField::Seeders, SortDirection::Descending),
            (SearchField::Peers, SortDirection::Descending),
        ]
    }

    fn sort_value(hit: &SearchHit, field: SearchField) -> SortValue {
        match field {
            SearchField::Size => hit.size.into(),
            SearchField::Seeders => hit.seeders.into(),
            SearchField::Peers => hit.peers.into(),
            SearchField::Link => hit.link.as_deref().into(),
        }
    }

    fn bucket(&self, hit: &SearchHit) -> Option<String> {
        Some(hit.tracker_id.clone())
    }

    fn item_line(&self, index: usize, hit: &SearchHit) -> String {
        let key = mark_key(hit);
        let mut line = format!(
            "<b>{}.</b> {} [{}] [{}] [{}s/{}p]",
            index + 1,
            html::escape(&hit.title),
            utils::format_size(hit.size),
            html::escape(&hit.tracker_id),
            hit.seeders,
            hit.peers
        );
        if self.downloaded.contains(&key) {
            line.push_str(" [+client]");
        }
        if self.streamed.contains(&key) {
            line.push_str(" [+torrserver]");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListState;

    fn hit(title: &str, size: u64, seeders: u64, peers: u64, tracker: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            size,
            seeders,
            peers,
            tracker_id: tracker.to_string(),
            link: Some(format!("http://jackett/dl/{}", title)),
            magnet_uri: None,
            details: None,
            poster: None,
        }
    }

    fn search_list() -> SearchList {
        SearchList::new(
            JackettApi::new("http://localhost:9117", "key".to_string()),
            "ubuntu",
            Vec::new(),
        )
    }

    #[test]
    fn test_default_sort_is_size_seeders_peers() {
        let mut list = ListState::new(search_list(), 5);
        list.set_items(vec![
            hit("small", 1, 9, 9, "a"),
            hit("big-few", 100, 1, 1, "a"),
            hit("big-many", 100, 5, 1, "b"),
        ]);
        let titles: Vec<_> = list.items().iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["big-many", "big-few", "small"]);

        let sorts: Vec<_> = list.render_page().rows[1].iter().map(|c| c.label.clone()).collect();
        assert_eq!(sorts, vec!["size↓", "seeds↓", "peers↓", "lnk"]);
    }

    #[test]
    fn test_item_line() {
        let kind = search_list();
        let line = kind.item_line(0, &hit("Ubuntu <LTS>", 1024, 12, 3, "rutor"));
        assert_eq!(line, "<b>1.</b> Ubuntu &lt;LTS&gt; [1.00 KB] [rutor] [12s/3p]");
    }

    #[test]
    fn test_marks() {
        let mut kind = search_list();
        let h = hit("a", 1, 1, 1, "x");
        kind.mark_downloaded(&h);
        assert!(kind.item_line(0, &h).ends_with("[+client]"));
        kind.mark_streamed(&h);
        assert!(kind.item_line(0, &h).ends_with("[+client] [+torrserver]"));
        assert!(!kind.item_line(0, &hit("b", 1, 1, 1, "x")).contains("[+"));
    }

    #[test]
    fn test_filter_by_tracker() {
        let mut list = ListState::new(search_list(), 5);
        list.set_items(vec![hit("a", 1, 1, 1, "rutor"), hit("b", 2, 1, 1, "kinozal")]);
        assert_eq!(list.classify(), vec!["kinozal", "rutor"]);
        list.toggle_filter("rutor");
        let titles: Vec<_> = list.items().iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["a"]);
    }
}
