//! Paginated, sortable, filterable list browsing
//!
//! A [`ListState`] owns the items of one browsing session and renders them a
//! page at a time together with the buttons that drive it: numbered selection
//! buttons, sort toggles, filter toggles and prev/reload/next navigation.
//! What the items are, where they come from and how one item is printed is
//! supplied by a [`ListKind`].
//!
//! Rendering is a pure function of the state, so two renders without a
//! mutation in between are identical. [`ListState::render_if_changed`] uses
//! that to skip message edits whose content would not change, measured
//! against the last page reported through [`ListState::mark_delivered`].

mod command;
mod render;
mod sort;

pub use command::{ListCommand, NOOP};
pub use render::{Control, RenderedPage, RULE};
pub use sort::{sort_by_keys, NoSort, SortDirection, SortField, SortValue};

use crate::constants::MAX_CALLBACK_DATA_LEN;
use std::collections::BTreeSet;
use std::future::Future;
use torrent::ApiResult;

/// One family of browsable items and the rules for printing them
pub trait ListKind: Send + Sync {
    type Item: Send + Sync;
    type Field: SortField;

    /// Whether the list offers a reload button
    const RELOADABLE: bool;

    /// Fetch the full item collection from the item source
    fn fetch(&self) -> impl Future<Output = ApiResult<Vec<Self::Item>>> + Send;

    /// Sort applied to a fresh list, highest precedence first
    fn default_sort(&self) -> Vec<(Self::Field, SortDirection)> {
        Vec::new()
    }

    fn sort_value(item: &Self::Item, field: Self::Field) -> SortValue;

    /// Filter bucket of an item; kinds without a filter field return `None`
    fn bucket(&self, _item: &Self::Item) -> Option<String> {
        None
    }

    /// Display line for the item at `index` of the filtered view
    fn item_line(&self, index: usize, item: &Self::Item) -> String;

    /// Summary printed under the page for the filtered items
    fn footer(&self, _items: &[&Self::Item]) -> Option<String> {
        None
    }
}

/// Outcome of applying a [`ListCommand`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// State changed; the page should be rendered again
    Rerender,
    /// An item was selected; the action menu should be shown
    Selected(usize),
    /// Nothing happened
    Unchanged,
}

/// Browsing state of one list
pub struct ListState<K: ListKind> {
    kind: K,
    items: Vec<K::Item>,
    sort: Vec<(K::Field, SortDirection)>,
    filter: BTreeSet<String>,
    page: usize,
    page_size: usize,
    selected: Option<usize>,
    last_digest: Option<String>,
}

impl<K: ListKind> ListState<K> {
    /// Create an empty list; call [`ListState::reload`] to populate it
    pub fn new(kind: K, page_size: usize) -> Self {
        let sort = kind.default_sort();
        Self {
            kind,
            items: Vec::new(),
            sort,
            filter: BTreeSet::new(),
            page: 0,
            page_size: page_size.max(1),
            selected: None,
            last_digest: None,
        }
    }

    pub fn kind_mut(&mut self) -> &mut K {
        &mut self.kind
    }

    /// Replace the items with a fresh fetch from the item source
    ///
    /// A failed fetch is logged and leaves the previous items in place.
    /// Returns whether the fetch succeeded.
    pub async fn reload(&mut self) -> bool {
        match self.kind.fetch().await {
            Ok(items) => {
                self.set_items(items);
                true
            }
            Err(err) => {
                tracing::error!("Error reloading list: {}", err);
                false
            }
        }
    }

    /// Replace the items wholesale and apply the configured sort
    ///
    /// Active filters whose bucket no longer occurs are dropped, as no
    /// filter button would be left to clear them.
    pub fn set_items(&mut self, items: Vec<K::Item>) {
        self.items = items;
        self.sort_items();
        self.selected = None;

        let buckets = self.classify();
        let before = self.filter.len();
        self.filter.retain(|bucket| buckets.contains(bucket));
        if self.filter.len() != before {
            tracing::debug!("Dropped {} vanished filter buckets", before - self.filter.len());
        }
        self.clamp_page();
    }

    fn sort_items(&mut self) {
        sort_by_keys(&mut self.items, &self.sort, K::sort_value);
    }

    fn clamp_page(&mut self) {
        let len = self.len();
        self.page = if len == 0 {
            0
        } else {
            self.page.min((len - 1) / self.page_size)
        };
    }

    /// Every item, ignoring the filter
    pub fn all_items(&self) -> &[K::Item] {
        &self.items
    }

    fn passes_filter(&self, item: &K::Item) -> bool {
        self.filter.is_empty()
            || self
                .kind
                .bucket(item)
                .is_some_and(|bucket| self.filter.contains(&bucket))
    }

    /// The filtered view, in sort order
    pub fn items(&self) -> Vec<&K::Item> {
        self.items.iter().filter(|item| self.passes_filter(item)).collect()
    }

    /// Number of items in the filtered view
    pub fn len(&self) -> usize {
        self.items.iter().filter(|item| self.passes_filter(item)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn page_index(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort_keys(&self) -> &[(K::Field, SortDirection)] {
        &self.sort
    }

    pub fn active_filters(&self) -> &BTreeSet<String> {
        &self.filter
    }

    fn page_in_bounds(&self, page: usize) -> bool {
        page * self.page_size < self.len()
    }

    pub fn next_page(&mut self) -> bool {
        if self.page_in_bounds(self.page + 1) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        match self.page.checked_sub(1) {
            Some(page) if self.page_in_bounds(page) => {
                self.page = page;
                true
            }
            _ => false,
        }
    }

    /// Add `field` as the lowest precedence key (descending), or flip its
    /// direction if it is already part of the sort
    ///
    /// A key is never removed once added.
    pub fn toggle_sort(&mut self, field: K::Field) {
        match self.sort.iter_mut().find(|(f, _)| *f == field) {
            Some((_, direction)) => *direction = direction.flipped(),
            None => self.sort.push((field, SortDirection::Descending)),
        }
        self.sort_items();
    }

    /// Include or exclude one filter bucket and go back to the first page
    pub fn toggle_filter(&mut self, bucket: &str) {
        if !self.filter.remove(bucket) {
            self.filter.insert(bucket.to_string());
        }
        self.page = 0;
    }

    /// Distinct filter buckets of the full collection, in first-seen order
    pub fn classify(&self) -> Vec<String> {
        let mut buckets: Vec<String> = Vec::new();
        for bucket in self.items.iter().filter_map(|item| self.kind.bucket(item)) {
            if !buckets.contains(&bucket) {
                buckets.push(bucket);
            }
        }
        buckets
    }

    /// Select the item at `index` of the filtered view
    ///
    /// Returns `None`, leaving the selection untouched, for an index that
    /// the last render could not have offered.
    pub fn select(&mut self, index: usize) -> Option<&K::Item> {
        if index >= self.len() {
            return None;
        }
        self.selected = Some(index);
        self.selected()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&K::Item> {
        let index = self.selected?;
        self.items().get(index).copied()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Display line of the selected item
    pub fn render_selected(&self) -> Option<String> {
        let index = self.selected?;
        let item = self.items().get(index).copied()?;
        Some(self.kind.item_line(index, item))
    }

    /// Half-open range of filtered indexes shown on the current page
    fn bounds(&self) -> (usize, usize) {
        let len = self.len();
        if len == 0 {
            return (0, 0);
        }
        let page = self.page.min((len - 1) / self.page_size);
        let from = page * self.page_size;
        (from, (from + self.page_size).min(len))
    }

    /// `results: 1-5 of 7`
    pub fn header(&self) -> String {
        let (from, to) = self.bounds();
        let len = self.len();
        if len == 0 {
            "<b>results: 0 of 0</b>".to_string()
        } else {
            format!("<b>results: {}-{} of {}</b>", from + 1, to, len)
        }
    }

    pub fn render_page(&self) -> RenderedPage {
        let (from, to) = self.bounds();
        let items = self.items();

        let lines: Vec<String> = (from..to)
            .map(|i| self.kind.item_line(i, items[i]))
            .collect();

        let mut text = self.header();
        text.push_str(RULE);
        text.push_str(&lines.join("\n\n"));
        if let Some(footer) = self.kind.footer(&items) {
            text.push_str(RULE);
            text.push_str(&footer);
        }

        let mut rows = Vec::new();

        let numbers: Vec<Control> = (from..to)
            .map(|i| Control::new((i + 1).to_string(), ListCommand::Select(i).token()))
            .collect();
        rows.push(numbers);

        let sorts: Vec<Control> = K::Field::ALL
            .iter()
            .map(|&field| {
                let mut label = field.label().to_string();
                if let Some((_, direction)) = self.sort.iter().find(|(f, _)| *f == field) {
                    label.push_str(direction.arrow());
                }
                Control::new(label, ListCommand::Sort(field.key().to_string()).token())
            })
            .collect();
        rows.push(sorts);

        let filters: Vec<Control> = self
            .classify()
            .into_iter()
            .map(|bucket| {
                let mark = if self.filter.contains(&bucket) { "✓" } else { "" };
                let token = ListCommand::Filter(bucket.clone()).token();
                Control::new(format!("{}{}", mark, bucket), token)
            })
            .filter(|control| control.token.len() <= MAX_CALLBACK_DATA_LEN)
            .collect();
        rows.push(filters);

        let dummy = || Control::new("-", NOOP);
        let page = from / self.page_size;
        rows.push(vec![
            if page > 0 {
                Control::new("⬅", ListCommand::PrevPage.token())
            } else {
                dummy()
            },
            if K::RELOADABLE {
                Control::new("🔁", ListCommand::Reload.token())
            } else {
                dummy()
            },
            if to < items.len() {
                Control::new("➡", ListCommand::NextPage.token())
            } else {
                dummy()
            },
        ]);

        rows.retain(|row| !row.is_empty());
        RenderedPage { text, rows }
    }

    /// Render, unless the result equals the last delivered page
    pub fn render_if_changed(&self) -> Option<RenderedPage> {
        let page = self.render_page();
        if self.last_digest.as_deref() == Some(page.digest().as_str()) {
            return None;
        }
        Some(page)
    }

    /// Record `page` as the one now shown in the chat
    ///
    /// Call only once the transport accepted it; until then the previous
    /// page is still the one on screen.
    pub fn mark_delivered(&mut self, page: &RenderedPage) {
        self.last_digest = Some(page.digest());
    }

    /// Forget the last delivered page, e.g. after its message was replaced
    pub fn invalidate(&mut self) {
        self.last_digest = None;
    }

    /// Apply one browsing command
    pub async fn apply(&mut self, command: ListCommand) -> ListEvent {
        match command {
            ListCommand::Select(index) => match self.select(index) {
                Some(_) => ListEvent::Selected(index),
                None => {
                    tracing::warn!("Ignoring selection of stale index {}", index);
                    ListEvent::Unchanged
                }
            },
            ListCommand::NextPage => changed(self.next_page()),
            ListCommand::PrevPage => changed(self.prev_page()),
            ListCommand::Reload if K::RELOADABLE => {
                self.reload().await;
                ListEvent::Rerender
            }
            ListCommand::Reload => ListEvent::Unchanged,
            ListCommand::Sort(key) => match K::Field::parse(&key) {
                Some(field) => {
                    self.toggle_sort(field);
                    ListEvent::Rerender
                }
                None => ListEvent::Unchanged,
            },
            ListCommand::Filter(bucket) => {
                self.toggle_filter(&bucket);
                ListEvent::Rerender
            }
            ListCommand::Noop => ListEvent::Unchanged,
        }
    }
}

fn changed(moved: bool) -> ListEvent {
    if moved {
        ListEvent::Rerender
    } else {
        ListEvent::Unchanged
    }
}
