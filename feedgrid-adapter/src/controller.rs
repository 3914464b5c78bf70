use std::cell::{Ref, RefCell};
use std::future::Future;
use std::pin::Pin;

use feedgrid::{
    Completion, FetchError, Grid, GridError, GridEvent, GridOptions, Page, PageRequest,
    RequestOutcome, SkipReason, Viewport,
};
use tokio::sync::mpsc;

use crate::source::PageSource;

/// An input from the host: geometry changes and user actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// Scroll or container resize in the scroll axis.
    Viewport(Viewport),
    /// Container resize in the cross axis.
    CrossSize(u32),
    Click(usize),
    AddToCart(usize),
    Retry,
    Refresh,
    Reset,
}

/// What happened to a request the controller tried to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveOutcome {
    Skipped(SkipReason),
    Completed(Completion),
}

type InFlight<'a> = Pin<Box<dyn Future<Output = (PageRequest, Result<Page, FetchError>)> + 'a>>;

/// A framework-neutral driver that connects a [`Grid`] to a [`PageSource`].
///
/// Everything runs on one logical thread: the grid lives in a `RefCell` and is never borrowed
/// across an `.await`, so scroll handling stays responsive while a page is being fetched.
///
/// Adapters either call the async helpers (`on_viewport`, `request_next_page`, ...) directly or
/// hand a stream of [`HostEvent`]s to [`FeedController::run`].
#[derive(Debug)]
pub struct FeedController<S> {
    grid: RefCell<Grid>,
    source: S,
}

impl<S: PageSource> FeedController<S> {
    pub fn new(options: GridOptions, source: S) -> Result<Self, GridError> {
        Ok(Self::from_grid(Grid::new(options)?, source))
    }

    pub fn from_grid(grid: Grid, source: S) -> Self {
        Self {
            grid: RefCell::new(grid),
            source,
        }
    }

    /// Read access for rendering. Do not hold the guard across an `.await`.
    pub fn grid(&self) -> Ref<'_, Grid> {
        self.grid.borrow()
    }

    pub fn with_grid_mut<R>(&self, f: impl FnOnce(&mut Grid) -> R) -> R {
        f(&mut self.grid.borrow_mut())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_parts(self) -> (Grid, S) {
        (self.grid.into_inner(), self.source)
    }

    /// Applies a viewport event and, if it triggered a page request, performs it.
    pub async fn on_viewport(&self, viewport: Viewport) -> Option<Completion> {
        let request = self.grid.borrow_mut().apply_viewport(viewport)?;
        Some(self.perform(request).await)
    }

    /// Requests the next page regardless of scroll position.
    pub async fn request_next_page(&self) -> DriveOutcome {
        let outcome = self.grid.borrow_mut().request_next_page();
        self.drive(outcome).await
    }

    pub async fn retry(&self) -> DriveOutcome {
        let outcome = self.grid.borrow_mut().retry();
        self.drive(outcome).await
    }

    pub async fn refresh(&self) -> DriveOutcome {
        let outcome = self.grid.borrow_mut().refresh();
        self.drive(outcome).await
    }

    /// Clears the list. A fetch still in flight is discarded when it resolves.
    pub fn reset(&self) {
        self.grid.borrow_mut().reset();
    }

    async fn drive(&self, outcome: RequestOutcome) -> DriveOutcome {
        match outcome {
            RequestOutcome::Issued(request) => DriveOutcome::Completed(self.perform(request).await),
            RequestOutcome::Skipped(reason) => {
                tracing::trace!(?reason, "page request skipped");
                DriveOutcome::Skipped(reason)
            }
        }
    }

    /// Fetches `request` from the source and applies the result.
    pub async fn perform(&self, request: PageRequest) -> Completion {
        let (request, result) = self.fetch(request).await;
        self.finish(request, result)
    }

    fn fetch(&self, request: PageRequest) -> InFlight<'_> {
        Box::pin(async move {
            tracing::debug!(
                page = request.page_number,
                limit = request.limit,
                session = request.session,
                "fetching page"
            );
            let result = self
                .source
                .fetch_page(request.page_number, request.limit)
                .await;
            (request, result)
        })
    }

    fn finish(&self, request: PageRequest, result: Result<Page, FetchError>) -> Completion {
        if let Err(error) = &result {
            tracing::warn!(page = request.page_number, %error, "page fetch failed");
        }
        let completion = self.grid.borrow_mut().complete(request, result);
        match completion {
            Completion::Merged(stats) => tracing::debug!(
                page = request.page_number,
                added = stats.added,
                duplicates = stats.duplicates,
                "page merged"
            ),
            Completion::Stale => tracing::debug!(
                page = request.page_number,
                session = request.session,
                "stale page discarded"
            ),
            Completion::Failed => {}
        }
        completion
    }

    fn handle(&self, event: HostEvent, output: &mpsc::UnboundedSender<GridEvent>) -> Option<PageRequest> {
        let mut grid = self.grid.borrow_mut();
        let emitted = match event {
            HostEvent::Viewport(viewport) => return grid.apply_viewport(viewport),
            HostEvent::CrossSize(cross_size) => {
                grid.set_cross_size(cross_size);
                return None;
            }
            HostEvent::Retry => return grid.retry().issued(),
            HostEvent::Refresh => return grid.refresh().issued(),
            HostEvent::Reset => {
                grid.reset();
                return None;
            }
            HostEvent::Click(index) => grid.item_clicked(index),
            HostEvent::AddToCart(index) => grid.add_to_cart(index),
        };
        if let Some(event) = emitted {
            if output.send(event).is_err() {
                tracing::debug!("grid event receiver dropped");
            }
        }
        None
    }

    /// Drives the grid from a stream of host events until the sender side is dropped.
    ///
    /// Clicks and add-to-cart actions are forwarded to `output` as [`GridEvent`]s. At most one
    /// fetch runs at a time; events keep being processed while it is pending. A fetch still
    /// pending when the stream ends is dropped.
    pub async fn run(
        &self,
        mut events: mpsc::UnboundedReceiver<HostEvent>,
        output: mpsc::UnboundedSender<GridEvent>,
    ) {
        let mut in_flight: Option<InFlight<'_>> = None;
        loop {
            tokio::select! {
                (request, result) = next_completion(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    self.finish(request, result);
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    if let Some(request) = self.handle(event, &output) {
                        // Only a reset can issue a request while another is pending; the old
                        // one belongs to a dead session.
                        in_flight = Some(self.fetch(request));
                    }
                }
            }
        }
        tracing::debug!(pending = in_flight.is_some(), "host event stream closed");
    }
}

async fn next_completion(
    in_flight: &mut Option<InFlight<'_>>,
) -> (PageRequest, Result<Page, FetchError>) {
    match in_flight {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}
