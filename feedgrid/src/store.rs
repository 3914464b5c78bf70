use alloc::vec::Vec;

use crate::key::IdSet;
use crate::{FetchError, Item, Page};

/// Where a list session is in its fetch lifecycle.
///
/// `Idle -> Loading -> (Idle | Errored)`, `Errored -> Loading` on retry, and `Exhausted` once the
/// source reports no more pages. Any phase returns to an empty `Idle` on reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FetchPhase {
    Idle,
    Loading,
    Errored,
    Exhausted,
}

/// The fetched list and its paging cursor.
///
/// Readers only ever see `&ListState`; all writes go through [`PageStore`], which in turn is
/// owned by the fetch coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListState {
    items: Vec<Item>,
    next_page: u32,
    has_more: bool,
    loading: bool,
    error: Option<FetchError>,
    session: u64,
    version: u64,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            has_more: true,
            loading: false,
            error: None,
            session: 0,
            version: 0,
        }
    }
}

impl ListState {
    /// Items in fetch order, unique by id.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Incremented by every reset. Page requests are tagged with it.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Incremented by every merge, failure and reset.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn phase(&self) -> FetchPhase {
        if self.loading {
            FetchPhase::Loading
        } else if self.error.is_some() {
            FetchPhase::Errored
        } else if !self.has_more {
            FetchPhase::Exhausted
        } else {
            FetchPhase::Idle
        }
    }
}

/// Result of merging one page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    /// Items skipped because their id was already present.
    pub duplicates: usize,
}

/// Owner of the [`ListState`].
#[derive(Clone, Debug, Default)]
pub struct PageStore {
    state: ListState,
    ids: IdSet,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Merges `page` into the list.
    ///
    /// Items whose id is already present are skipped, so delivering the same page twice leaves
    /// the list unchanged. Existing items never move.
    pub fn append(&mut self, page: Page) -> MergeStats {
        let mut stats = MergeStats::default();
        let newest = page.page_number.saturating_add(1) >= self.state.next_page;

        self.state.items.reserve(page.items.len());
        for item in page.items {
            if self.ids.contains(&item.id) {
                stats.duplicates += 1;
                continue;
            }
            self.ids.insert(item.id.clone());
            self.state.items.push(item);
            stats.added += 1;
        }

        if newest {
            self.state.has_more = page.has_more;
            self.state.next_page = page.page_number.saturating_add(1);
        }
        self.state.version = self.state.version.wrapping_add(1);
        gtrace!(
            page = page.page_number,
            added = stats.added,
            duplicates = stats.duplicates,
            total = self.state.items.len(),
            "PageStore::append"
        );
        stats
    }

    /// Clears the list and starts a new session at page 1.
    ///
    /// Any request still in flight belongs to the previous session and will be discarded.
    pub fn reset(&mut self) {
        self.state.items.clear();
        self.ids.clear();
        self.state.next_page = 1;
        self.state.has_more = true;
        self.state.loading = false;
        self.state.error = None;
        self.state.session = self.state.session.wrapping_add(1);
        self.state.version = self.state.version.wrapping_add(1);
        gdebug!(session = self.state.session, "PageStore::reset");
    }

    pub(crate) fn begin_loading(&mut self) {
        self.state.loading = true;
        self.state.error = None;
    }

    pub(crate) fn finish_loading(&mut self) {
        self.state.loading = false;
    }

    pub(crate) fn fail(&mut self, error: FetchError) {
        self.state.loading = false;
        self.state.error = Some(error);
        self.state.version = self.state.version.wrapping_add(1);
    }
}
