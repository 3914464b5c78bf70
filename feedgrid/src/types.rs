use alloc::string::String;
use alloc::vec::Vec;

/// A single card in the feed.
///
/// Immutable once fetched. Identity is `id`: two items with the same id are the same item, even
/// when delivered by different pages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub author_name: String,
    pub category: String,
    pub estimated_duration_minutes: u32,
    pub popularity_score: u32,
}

/// One server-paginated batch of items plus its continuation flag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    /// 1-based page number.
    pub page_number: u32,
    pub items: Vec<Item>,
    pub has_more: bool,
}

/// Contiguous range of item indexes to materialize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VisibleRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// Geometry of one grid cell, derived from an index and the layout parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub index: usize,
    pub column: u32,
    pub row: u64,
    /// Offset in the scroll axis.
    pub top: u64,
    /// Offset in the cross axis. Zero when the container width is unknown.
    pub left: u32,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// An item paired with the cell it occupies. Derived on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedItem<'a> {
    pub item: &'a Item,
    pub placement: Placement,
}

/// User interaction on a rendered card, carrying the item it targets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridEvent {
    ItemClicked(Item),
    AddToCart(Item),
}

impl GridEvent {
    pub fn item(&self) -> &Item {
        match self {
            Self::ItemClicked(item) | Self::AddToCart(item) => item,
        }
    }
}
