use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use feedgrid::{FetchError, Page};

/// The paged-fetch collaborator.
///
/// Implementations may use any transport (HTTP, local storage, fixtures). A failure is reported
/// as a [`FetchError`] and recorded by the grid as a retryable condition.
///
/// Futures are not required to be `Send`: the grid runs on a single logical thread, like a UI
/// event loop.
#[async_trait(?Send)]
pub trait PageSource {
    /// Fetches page `page_number` (1-based) holding at most `limit` items.
    async fn fetch_page(&self, page_number: u32, limit: u32) -> Result<Page, FetchError>;
}

#[async_trait(?Send)]
impl<S: PageSource + ?Sized> PageSource for Rc<S> {
    async fn fetch_page(&self, page_number: u32, limit: u32) -> Result<Page, FetchError> {
        (**self).fetch_page(page_number, limit).await
    }
}

/// Wraps a source so that a fetch taking longer than `timeout` fails with
/// [`FetchError::Timeout`].
#[derive(Clone, Debug)]
pub struct WithTimeout<S> {
    inner: S,
    timeout: Duration,
}

impl<S> WithTimeout<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait(?Send)]
impl<S: PageSource> PageSource for WithTimeout<S> {
    async fn fetch_page(&self, page_number: u32, limit: u32) -> Result<Page, FetchError> {
        match tokio::time::timeout(self.timeout, self.inner.fetch_page(page_number, limit)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    page = page_number,
                    timeout = ?self.timeout,
                    "page fetch timed out"
                );
                Err(FetchError::Timeout)
            }
        }
    }
}
