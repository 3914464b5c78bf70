use crate::Placement;
use crate::error::ConfigError;

/// Validated grid geometry.
///
/// Every cell has the same height, so an index maps to its cell in `O(1)` without any cached
/// state. Changing the column count produces a different `LayoutParams`, which is what
/// invalidates every previously computed placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayoutParams {
    column_count: u32,
    gap: u32,
    estimated_item_height: u32,
    overscan_count: usize,
    cross_size: u32,
}

impl LayoutParams {
    pub fn new(
        column_count: u32,
        gap: u32,
        estimated_item_height: u32,
        overscan_count: usize,
    ) -> Result<Self, ConfigError> {
        if column_count == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if estimated_item_height == 0 {
            return Err(ConfigError::ZeroItemHeight);
        }
        Ok(Self {
            column_count,
            gap,
            estimated_item_height,
            overscan_count,
            cross_size: 0,
        })
    }

    /// Sets the container width used for `left`/`width`.
    pub fn with_cross_size(mut self, cross_size: u32) -> Self {
        self.cross_size = cross_size;
        self
    }

    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    pub fn estimated_item_height(&self) -> u32 {
        self.estimated_item_height
    }

    pub fn overscan_count(&self) -> usize {
        self.overscan_count
    }

    pub fn cross_size(&self) -> u32 {
        self.cross_size
    }

    /// Distance between the tops of two consecutive rows.
    pub fn row_stride(&self) -> u64 {
        self.estimated_item_height as u64 + self.gap as u64
    }

    pub fn row_count(&self, item_count: usize) -> u64 {
        (item_count as u64).div_ceil(self.column_count as u64)
    }

    /// Geometry of the cell at `index`. Pure: identical arguments give identical output.
    pub fn position_of(&self, index: usize) -> Placement {
        let columns = self.column_count as u64;
        let column = (index as u64 % columns) as u32;
        let row = index as u64 / columns;
        let (left, width) = self.column_span(column);
        Placement {
            index,
            column,
            row,
            top: row.saturating_mul(self.row_stride()),
            left,
            width,
            height: self.estimated_item_height,
        }
    }

    /// Scrollable height for `item_count` items, independent of how many are materialized.
    pub fn total_extent(&self, item_count: usize) -> u64 {
        if item_count == 0 {
            return 0;
        }
        self.row_count(item_count)
            .saturating_mul(self.row_stride())
            .saturating_add(self.gap as u64)
    }

    /// Cross-axis `(left, width)` of `column`.
    ///
    /// Columns tile the container exactly: the space left after the inner gaps is split at
    /// integer boundaries, so widths differ by at most one unit and the last column ends flush
    /// with the container.
    pub fn column_span(&self, column: u32) -> (u32, u32) {
        let columns = self.column_count as u64;
        let column = (column as u64).min(columns - 1);
        let gap = self.gap as u64;
        let inner_gaps = gap.saturating_mul(columns - 1);
        let available = (self.cross_size as u64).saturating_sub(inner_gaps);
        if available == 0 {
            return (0, 0);
        }

        let start = available * column / columns;
        let end = available * (column + 1) / columns;
        let left = start + gap * column;
        (left as u32, (end - start) as u32)
    }
}
