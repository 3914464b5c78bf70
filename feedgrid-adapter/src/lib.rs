//! Async adapter utilities for the `feedgrid` crate.
//!
//! The `feedgrid` crate is headless and performs no I/O: it hands out page requests and expects
//! their results back. This crate provides the pieces most hosts need around it:
//!
//! - [`PageSource`], the paged-fetch collaborator, plus a [`WithTimeout`] wrapper
//! - [`decode_page`] for the `{code, message, data: {list, hasMore}}` JSON envelope
//! - [`FixtureSource`], a deterministic source for demos and tests
//! - [`FeedController`], which drives a grid from a stream of [`HostEvent`]s
//!
//! This crate is intentionally framework-agnostic (no UI toolkit bindings).
#![forbid(unsafe_code)]

mod controller;
pub mod envelope;
mod fixture;
mod source;

#[cfg(test)]
mod tests;

pub use controller::{DriveOutcome, FeedController, HostEvent};
pub use envelope::{decode_page, encode_page};
pub use fixture::{FixtureSource, generated_item, item_for_id};
pub use source::{PageSource, WithTimeout};
