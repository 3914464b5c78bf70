use crate::{ListState, Viewport};

/// Decides when scrolling has come close enough to the end of the loaded content to request
/// the next page.
///
/// The coordinator's in-flight guard already drops redundant requests; the trigger additionally
/// fires at most once per [`ListState::version`], so a burst of scroll events between two
/// completions produces a single signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadMoreTrigger {
    scroll_threshold: u64,
    fired_at_version: Option<u64>,
}

impl LoadMoreTrigger {
    pub fn new(scroll_threshold: u64) -> Self {
        Self {
            scroll_threshold,
            fired_at_version: None,
        }
    }

    pub fn scroll_threshold(&self) -> u64 {
        self.scroll_threshold
    }

    /// `true` when the viewport reaches within `scroll_threshold` of `total_extent` while more
    /// pages exist and nothing is loading.
    ///
    /// A failed fetch bumps the list version, so the next qualifying event after a failure
    /// requests the same page again.
    pub fn qualifies(&self, viewport: Viewport, total_extent: u64, state: &ListState) -> bool {
        state.has_more()
            && !state.loading()
            && viewport.end() >= total_extent.saturating_sub(self.scroll_threshold)
    }

    /// Observes one scroll/resize event. Returns `true` when the caller should request the next
    /// page.
    pub fn observe(&mut self, viewport: Viewport, total_extent: u64, state: &ListState) -> bool {
        if !self.qualifies(viewport, total_extent, state) {
            return false;
        }
        if self.fired_at_version == Some(state.version()) {
            return false;
        }
        self.fired_at_version = Some(state.version());
        gtrace!(
            scroll_offset = viewport.scroll_offset,
            container_height = viewport.container_height,
            total_extent,
            "load-more trigger fired"
        );
        true
    }

    pub fn rearm(&mut self) {
        self.fired_at_version = None;
    }
}
