use crate::store::{ListState, MergeStats, PageStore};
use crate::{FetchError, Page, PagingLimits};

/// A page request issued by the coordinator, tagged with the session it belongs to.
///
/// The host performs the actual fetch (`page_number`, `limit`) and hands the result back through
/// [`FetchCoordinator::complete`] together with this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRequest {
    pub session: u64,
    pub page_number: u32,
    pub limit: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Another request is already in flight.
    InFlight,
    /// The source reported no more pages.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    Issued(PageRequest),
    Skipped(SkipReason),
}

impl RequestOutcome {
    pub fn issued(self) -> Option<PageRequest> {
        match self {
            Self::Issued(request) => Some(request),
            Self::Skipped(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Merged(MergeStats),
    /// The failure was recorded in `ListState::error`; the cursor did not move.
    Failed,
    /// The request no longer matches the current session and was discarded.
    Stale,
}

/// Drives page requests against the [`PageStore`].
///
/// This is the only writer of the list state. At most one request is in flight; triggers that
/// arrive meanwhile are dropped rather than queued.
#[derive(Clone, Debug)]
pub struct FetchCoordinator {
    store: PageStore,
    limits: PagingLimits,
    in_flight: Option<PageRequest>,
}

impl FetchCoordinator {
    pub fn new(limits: PagingLimits) -> Self {
        Self {
            store: PageStore::new(),
            limits,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &ListState {
        self.store.state()
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    pub fn limits(&self) -> PagingLimits {
        self.limits
    }

    pub fn in_flight(&self) -> Option<PageRequest> {
        self.in_flight
    }

    /// Requests the next page, sized by the paging limits (page 1 uses `initial_limit`).
    pub fn request_next_page(&mut self) -> RequestOutcome {
        let limit = self.limits.limit_for(self.store.state().next_page());
        self.request_page_with_limit(limit)
    }

    /// Requests the next page with an explicit size (clamped to at least 1).
    ///
    /// Also serves as the explicit retry after a failure: the cursor was not advanced, so the
    /// same page is requested again.
    pub fn request_page_with_limit(&mut self, page_size: u32) -> RequestOutcome {
        let state = self.store.state();
        if state.loading() {
            gtrace!(page = state.next_page(), "request skipped: in flight");
            return RequestOutcome::Skipped(SkipReason::InFlight);
        }
        if !state.has_more() {
            gtrace!(page = state.next_page(), "request skipped: exhausted");
            return RequestOutcome::Skipped(SkipReason::Exhausted);
        }

        let request = PageRequest {
            session: state.session(),
            page_number: state.next_page(),
            limit: page_size.max(1),
        };
        self.store.begin_loading();
        self.in_flight = Some(request);
        gdebug!(
            session = request.session,
            page = request.page_number,
            limit = request.limit,
            "page request issued"
        );
        RequestOutcome::Issued(request)
    }

    /// Applies the result of `request`.
    ///
    /// Results for a request that is not the one in flight (for example one issued before a
    /// reset) are discarded without touching the list.
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<Page, FetchError>,
    ) -> Completion {
        if self.in_flight != Some(request) {
            gwarn!(
                session = request.session,
                current_session = self.store.state().session(),
                page = request.page_number,
                "discarding stale page result"
            );
            return Completion::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(mut page) => {
                page.page_number = request.page_number;
                let stats = self.store.append(page);
                self.store.finish_loading();
                Completion::Merged(stats)
            }
            Err(error) => {
                gwarn!(page = request.page_number, %error, "page request failed");
                self.store.fail(error);
                Completion::Failed
            }
        }
    }

    /// Clears the list and starts a new session. A request in flight becomes stale.
    pub fn reset(&mut self) {
        self.in_flight = None;
        self.store.reset();
    }
}
