//! A headless, virtualized, infinitely-loading grid engine.
//!
//! For an async driver over a paged data source, see the `feedgrid-adapter` crate.
//!
//! The engine displays an unbounded, server-paginated list of cards in a fixed-column grid. It
//! materializes only the items whose rows intersect the viewport (plus an overscan margin),
//! reports the full scrollable extent as if every item were rendered, and asks for the next
//! page as the viewport approaches the end of the loaded data.
//!
//! It is UI-agnostic and performs no I/O. A host is expected to provide:
//! - viewport geometry (scroll offset, container height, optionally container width)
//! - a paged fetch that fulfils the [`PageRequest`]s the grid hands out
//!
//! Cell heights are a fixed estimate per grid; every index maps to its cell without any cached
//! layout.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod coordinator;
mod error;
mod grid;
mod key;
mod layout;
mod options;
mod state;
mod store;
mod trigger;
mod types;
mod window;


pub use coordinator::{Completion, FetchCoordinator, PageRequest, RequestOutcome, SkipReason};
pub use error::{ConfigError, FetchError, GridError};
pub use grid::{Grid, OnChangeCallback};
pub use layout::LayoutParams;
pub use options::{GridOptions, PagingLimits};
pub use state::{ListStatus, RenderState, Viewport};
pub use store::{FetchPhase, ListState, MergeStats, PageStore};
pub use trigger::LoadMoreTrigger;
pub use types::{GridEvent, Item, Page, PlacedItem, Placement, VisibleRange};
pub use window::visible_range;
