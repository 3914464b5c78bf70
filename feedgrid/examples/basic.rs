// Example: drive a grid by hand, fulfilling its page requests synchronously.
use feedgrid::{Grid, GridOptions, Item, Page, PageRequest, Viewport};

fn serve(request: PageRequest) -> Page {
    let items = (0..request.limit)
        .map(|i| Item {
            id: format!("card-{}-{i}", request.page_number),
            title: format!("Card {i} of page {}", request.page_number),
            ..Item::default()
        })
        .collect();
    Page {
        page_number: request.page_number,
        items,
        has_more: request.page_number < 5,
    }
}

fn main() -> Result<(), feedgrid::GridError> {
    let mut grid = Grid::new(GridOptions::new(2, 300).with_gap(15).with_cross_size(375))?;

    for offset in [0u64, 400, 1_800, 3_000, 3_000] {
        if let Some(request) = grid.apply_viewport(Viewport::new(offset, 800)) {
            println!(
                "offset={offset}: fetching page {} ({} items)",
                request.page_number, request.limit
            );
            grid.complete(request, Ok(serve(request)));
        }
        println!(
            "offset={offset}: items={} extent={} visible={:?} status={:?}",
            grid.item_count(),
            grid.total_extent(),
            grid.visible_range(),
            grid.status()
        );
    }

    grid.for_each_placed_item(|placed| {
        println!(
            "  {} at top={} left={} width={}",
            placed.item.id, placed.placement.top, placed.placement.left, placed.placement.width
        );
    });
    Ok(())
}
