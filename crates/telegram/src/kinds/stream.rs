use crate::list::{ListKind, NoSort, SortValue};
use crate::utils;
use teloxide::utils::html;
use torrent::{ApiResult, StreamEntry, TorrServerApi};

/// Catalog of the streaming server
pub struct StreamList {
    torrserver: TorrServerApi,
}

impl StreamList {
    pub fn new(torrserver: TorrServerApi) -> Self {
        Self { torrserver }
    }
}

impl ListKind for StreamList {
    type Item = StreamEntry;
    type Field = NoSort;
    const RELOADABLE: bool = true;

    async fn fetch(&self) -> ApiResult<Vec<StreamEntry>> {
        self.torrserver.list().await
    }

    fn sort_value(_entry: &StreamEntry, field: NoSort) -> SortValue {
        match field {}
    }

    fn item_line(&self, index: usize, entry: &StreamEntry) -> String {
        format!(
            "<b>{}</b>. {} [{}]",
            index + 1,
            html::escape(&entry.title),
            utils::format_size(entry.size)
        )
    }
}
