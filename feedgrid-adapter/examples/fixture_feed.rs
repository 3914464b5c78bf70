// Example: a host loop feeding scroll events and clicks to a controller over the fixture source.
//
// Run with `RUST_LOG=feedgrid_adapter=debug` to see the paging decisions.
use std::time::Duration;

use feedgrid::{GridOptions, Viewport};
use feedgrid_adapter::{FeedController, FixtureSource, HostEvent, WithTimeout};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let source = WithTimeout::new(FixtureSource::new(3), Duration::from_secs(2));
    let controller = FeedController::new(GridOptions::default().with_cross_size(375), source)?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (output_tx, mut output_rx) = mpsc::unbounded_channel();

    let host = async {
        let mut offset = 0u64;
        while offset <= 6_000 {
            events_tx.send(HostEvent::Viewport(Viewport::new(offset, 800)))?;
            tokio::time::sleep(Duration::from_millis(10)).await;
            let grid = controller.grid();
            println!(
                "offset={offset} items={} extent={} visible={:?} status={:?}",
                grid.item_count(),
                grid.total_extent(),
                grid.visible_range(),
                grid.status()
            );
            offset += 600;
        }
        events_tx.send(HostEvent::Click(2))?;
        events_tx.send(HostEvent::AddToCart(5))?;
        drop(events_tx);
        Ok::<_, mpsc::error::SendError<HostEvent>>(())
    };

    let ((), sent) = tokio::join!(controller.run(events_rx, output_tx), host);
    sent?;

    while let Some(event) = output_rx.recv().await {
        println!("{event:?}");
    }
    Ok(())
}
