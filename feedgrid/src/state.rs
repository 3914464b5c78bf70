use crate::FetchError;

/// Scroll geometry pushed by the host on every scroll or container resize.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub scroll_offset: u64,
    pub container_height: u64,
}

impl Viewport {
    pub fn new(scroll_offset: u64, container_height: u64) -> Self {
        Self {
            scroll_offset,
            container_height,
        }
    }

    /// Offset of the viewport's bottom edge.
    pub fn end(&self) -> u64 {
        self.scroll_offset.saturating_add(self.container_height)
    }
}

/// Which list-level affordance the host should show around the cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListStatus {
    /// A page request is in flight.
    Loading,
    /// The last page request failed; the host should offer a retry.
    Errored,
    /// Every page has been fetched and none had any items.
    Empty,
    /// Every page has been fetched.
    EndOfList,
    /// More pages exist and nothing is in flight.
    MoreAvailable,
}

/// Everything besides the placed items that a host needs to render a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderState {
    pub total_extent: u64,
    pub item_count: usize,
    pub loading: bool,
    pub has_more: bool,
    pub error: Option<FetchError>,
    pub status: ListStatus,
}
