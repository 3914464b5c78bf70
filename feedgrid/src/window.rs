use crate::{LayoutParams, Viewport, VisibleRange};

/// Computes the contiguous index range to materialize for `viewport`.
///
/// Whole rows touching the viewport are included, widened by `overscan_count` items on each
/// side and clamped to `[0, item_count]`. Pure: no state, so it can run on every scroll event.
pub fn visible_range(viewport: Viewport, params: &LayoutParams, item_count: usize) -> VisibleRange {
    if item_count == 0 {
        return VisibleRange::default();
    }

    let stride = params.row_stride();
    let columns = params.column_count() as u64;
    let overscan = params.overscan_count() as u64;
    let count = item_count as u64;

    let first_row = viewport.scroll_offset / stride;
    let start = first_row
        .saturating_mul(columns)
        .saturating_sub(overscan)
        .min(count);

    let last_row_exclusive = viewport.end().div_ceil(stride);
    let end = last_row_exclusive
        .saturating_mul(columns)
        .saturating_add(overscan)
        .min(count);

    VisibleRange {
        start_index: start.min(end) as usize,
        end_index: end as usize,
    }
}
