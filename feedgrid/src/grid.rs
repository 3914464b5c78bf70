use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::coordinator::{Completion, FetchCoordinator, PageRequest, RequestOutcome};
use crate::store::ListState;
use crate::trigger::LoadMoreTrigger;
use crate::window::visible_range;
use crate::{
    FetchError, GridError, GridEvent, GridOptions, LayoutParams, ListStatus, Page, PlacedItem,
    Placement, RenderState, Viewport, VisibleRange,
};

/// A callback fired when the grid's render output may have changed.
pub type OnChangeCallback = Arc<dyn Fn(&Grid) + Send + Sync>;

/// A headless, virtualized, infinitely-loading grid.
///
/// This type does not hold any UI objects and performs no I/O:
/// - Your adapter pushes viewport geometry with [`Grid::apply_viewport`].
/// - When more data is needed the grid hands back a [`PageRequest`]; the adapter fetches it and
///   returns the result through [`Grid::complete`].
/// - Rendering is exposed via [`Grid::for_each_placed_item`] and [`Grid::render_state`].
///
/// For an async driver over a page source, see the `feedgrid-adapter` crate.
#[derive(Clone)]
pub struct Grid {
    options: GridOptions,
    layout: LayoutParams,
    viewport: Viewport,
    coordinator: FetchCoordinator,
    trigger: LoadMoreTrigger,
    on_change: Option<OnChangeCallback>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Grid {
    pub fn new(options: GridOptions) -> Result<Self, GridError> {
        let (layout, limits) = options.validate()?;
        gdebug!(
            columns = layout.column_count(),
            item_height = layout.estimated_item_height(),
            overscan = layout.overscan_count(),
            "Grid::new"
        );
        Ok(Self {
            options,
            layout,
            viewport: Viewport::default(),
            coordinator: FetchCoordinator::new(limits),
            trigger: LoadMoreTrigger::new(options.scroll_threshold),
            on_change: None,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        })
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn state(&self) -> &ListState {
        self.coordinator.state()
    }

    pub fn coordinator(&self) -> &FetchCoordinator {
        &self.coordinator
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&Grid) + Send + Sync + 'static>) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        if let Some(cb) = &self.on_change {
            cb(self);
        }
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        let out = f(self);

        let next = self.notify_depth.get().saturating_sub(1);
        self.notify_depth.set(next);
        if next == 0 && self.notify_pending.replace(false) {
            self.notify();
        }
        out
    }

    /// Applies a scroll or resize event from the host.
    ///
    /// Returns the page request to perform when the viewport came close enough to the end of
    /// the loaded content.
    pub fn apply_viewport(&mut self, viewport: Viewport) -> Option<PageRequest> {
        gtrace!(
            scroll_offset = viewport.scroll_offset,
            container_height = viewport.container_height,
            "apply_viewport"
        );
        self.batch_update(|g| {
            g.viewport = viewport;
            g.notify();

            let total = g.total_extent();
            if !g.trigger.observe(viewport, total, g.coordinator.state()) {
                return None;
            }
            let request = g.coordinator.request_next_page().issued();
            if request.is_some() {
                g.notify();
            }
            request
        })
    }

    /// Updates the container width used for cross-axis placement.
    pub fn set_cross_size(&mut self, cross_size: u32) {
        if self.layout.cross_size() == cross_size {
            return;
        }
        self.options.cross_size = cross_size;
        self.layout = self.layout.with_cross_size(cross_size);
        self.notify();
    }

    /// Changes the column count. Every placement is recomputed from the new layout.
    pub fn set_column_count(&mut self, column_count: u32) -> Result<(), GridError> {
        if self.layout.column_count() == column_count {
            return Ok(());
        }
        let options = self.options.with_column_count(column_count);
        let (layout, _) = options.validate()?;
        self.options = options;
        self.layout = layout;
        self.notify();
        Ok(())
    }

    pub fn item_count(&self) -> usize {
        self.state().len()
    }

    pub fn total_extent(&self) -> u64 {
        self.layout.total_extent(self.item_count())
    }

    pub fn visible_range(&self) -> VisibleRange {
        visible_range(self.viewport, &self.layout, self.item_count())
    }

    pub fn visible_range_for(&self, viewport: Viewport) -> VisibleRange {
        visible_range(viewport, &self.layout, self.item_count())
    }

    pub fn placement(&self, index: usize) -> Option<Placement> {
        (index < self.item_count()).then(|| self.layout.position_of(index))
    }

    /// Maps a point inside the content (scroll axis, cross axis) to the card under it.
    ///
    /// Points in a gap, or in the cross axis when the container width is unknown, map to
    /// `None`.
    pub fn index_at_point(&self, top: u64, left: u32) -> Option<usize> {
        let row = top / self.layout.row_stride();
        if top % self.layout.row_stride() >= self.layout.estimated_item_height() as u64 {
            return None;
        }
        let column = (0..self.layout.column_count()).find(|&c| {
            let (start, width) = self.layout.column_span(c);
            left >= start && left < start.saturating_add(width)
        })?;
        let index = row
            .checked_mul(self.layout.column_count() as u64)?
            .checked_add(column as u64)?;
        let index = usize::try_from(index).ok()?;
        (index < self.item_count()).then_some(index)
    }

    pub fn for_each_placed_item<'a>(&'a self, mut f: impl FnMut(PlacedItem<'a>)) {
        let range = self.visible_range();
        let items = self.state().items();
        for index in range.start_index..range.end_index {
            f(PlacedItem {
                item: &items[index],
                placement: self.layout.position_of(index),
            });
        }
    }

    /// Collects the placed items for the current viewport into `out` (clears `out` first).
    ///
    /// Prefer [`Self::for_each_placed_item`] with a reused buffer in hot paths.
    pub fn collect_placed_items<'a>(&'a self, out: &mut Vec<PlacedItem<'a>>) {
        out.clear();
        self.for_each_placed_item(|placed| out.push(placed));
    }

    pub fn status(&self) -> ListStatus {
        let state = self.state();
        if state.loading() {
            ListStatus::Loading
        } else if state.error().is_some() {
            ListStatus::Errored
        } else if !state.has_more() && state.is_empty() {
            ListStatus::Empty
        } else if !state.has_more() {
            ListStatus::EndOfList
        } else {
            ListStatus::MoreAvailable
        }
    }

    pub fn render_state(&self) -> RenderState {
        let state = self.state();
        RenderState {
            total_extent: self.total_extent(),
            item_count: state.len(),
            loading: state.loading(),
            has_more: state.has_more(),
            error: state.error().cloned(),
            status: self.status(),
        }
    }

    /// Requests the next page regardless of scroll position (e.g. the first page).
    pub fn request_next_page(&mut self) -> RequestOutcome {
        let outcome = self.coordinator.request_next_page();
        if outcome.issued().is_some() {
            self.notify();
        }
        outcome
    }

    /// Re-requests the page that failed. Also re-arms the load-more trigger.
    pub fn retry(&mut self) -> RequestOutcome {
        self.trigger.rearm();
        self.request_next_page()
    }

    pub fn complete(&mut self, request: PageRequest, result: Result<Page, FetchError>) -> Completion {
        let completion = self.coordinator.complete(request, result);
        if completion != Completion::Stale {
            self.notify();
        }
        completion
    }

    /// Clears the list and starts a new session. A request in flight becomes stale.
    pub fn reset(&mut self) {
        self.coordinator.reset();
        self.trigger.rearm();
        self.notify();
    }

    /// Resets, then requests page 1.
    pub fn refresh(&mut self) -> RequestOutcome {
        self.batch_update(|g| {
            g.reset();
            g.request_next_page()
        })
    }

    pub fn item_clicked(&self, index: usize) -> Option<GridEvent> {
        self.state().get(index).cloned().map(GridEvent::ItemClicked)
    }

    pub fn add_to_cart(&self, index: usize) -> Option<GridEvent> {
        self.state().get(index).cloned().map(GridEvent::AddToCart)
    }
}

impl core::fmt::Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Grid")
            .field("options", &self.options)
            .field("viewport", &self.viewport)
            .field("item_count", &self.item_count())
            .field("phase", &self.state().phase())
            .finish_non_exhaustive()
    }
}
