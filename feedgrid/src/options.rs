use crate::error::{ConfigError, GridError};
use crate::layout::LayoutParams;

/// Page sizes used by the fetch coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagingLimits {
    /// Size of page 1. Kept small so the first paint is fast.
    pub initial_limit: u32,
    /// Size of every later page.
    pub load_more_limit: u32,
}

impl PagingLimits {
    pub fn limit_for(&self, page_number: u32) -> u32 {
        if page_number <= 1 {
            self.initial_limit
        } else {
            self.load_more_limit
        }
    }
}

impl Default for PagingLimits {
    fn default() -> Self {
        Self {
            initial_limit: 4,
            load_more_limit: 10,
        }
    }
}

/// Configuration for [`crate::Grid`].
///
/// Plain data: hosts can keep it in their own config files (with `feature = "serde"`, missing
/// fields fall back to [`Default`]). Call [`GridOptions::validate`] or [`crate::Grid::new`] to
/// check it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    pub column_count: u32,
    /// Space between rows and between columns.
    pub gap: u32,
    /// Height used for every cell in the scroll axis.
    pub estimated_item_height: u32,
    /// Extra items materialized before and after the visible rows.
    pub overscan_count: usize,
    /// Container width in the cross axis. Zero means unknown; placements then report
    /// `left = 0` and `width = 0`.
    pub cross_size: u32,
    pub initial_limit: u32,
    pub load_more_limit: u32,
    /// Distance from the end of the content at which the next page is requested.
    pub scroll_threshold: u64,
}

impl Default for GridOptions {
    fn default() -> Self {
        let limits = PagingLimits::default();
        Self {
            column_count: 2,
            gap: 15,
            estimated_item_height: 300,
            overscan_count: 5,
            cross_size: 0,
            initial_limit: limits.initial_limit,
            load_more_limit: limits.load_more_limit,
            scroll_threshold: 200,
        }
    }
}

impl GridOptions {
    pub fn new(column_count: u32, estimated_item_height: u32) -> Self {
        Self {
            column_count,
            estimated_item_height,
            ..Self::default()
        }
    }

    pub fn with_column_count(mut self, column_count: u32) -> Self {
        self.column_count = column_count;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_estimated_item_height(mut self, height: u32) -> Self {
        self.estimated_item_height = height;
        self
    }

    pub fn with_overscan(mut self, overscan_count: usize) -> Self {
        self.overscan_count = overscan_count;
        self
    }

    pub fn with_cross_size(mut self, cross_size: u32) -> Self {
        self.cross_size = cross_size;
        self
    }

    pub fn with_limits(mut self, initial_limit: u32, load_more_limit: u32) -> Self {
        self.initial_limit = initial_limit;
        self.load_more_limit = load_more_limit;
        self
    }

    pub fn with_scroll_threshold(mut self, scroll_threshold: u64) -> Self {
        self.scroll_threshold = scroll_threshold;
        self
    }

    pub fn paging_limits(&self) -> PagingLimits {
        PagingLimits {
            initial_limit: self.initial_limit,
            load_more_limit: self.load_more_limit,
        }
    }

    pub fn validate(&self) -> Result<(LayoutParams, PagingLimits), GridError> {
        let layout = LayoutParams::new(
            self.column_count,
            self.gap,
            self.estimated_item_height,
            self.overscan_count,
        )?
        .with_cross_size(self.cross_size);

        if self.initial_limit == 0 {
            return Err(ConfigError::ZeroInitialLimit.into());
        }
        if self.load_more_limit == 0 {
            return Err(ConfigError::ZeroLoadMoreLimit.into());
        }
        Ok((layout, self.paging_limits()))
    }
}
