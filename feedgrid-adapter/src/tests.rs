use crate::*;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use feedgrid::{
    Completion, FetchError, GridEvent, GridOptions, ListStatus, Page, SkipReason, Viewport,
};
use tokio::sync::{Notify, mpsc};

fn scenario_options() -> GridOptions {
    GridOptions::new(2, 300)
        .with_gap(15)
        .with_overscan(5)
        .with_limits(4, 10)
        .with_scroll_threshold(200)
}

/// A source whose fetches stay pending until the test opens the gate.
#[derive(Default)]
struct GatedSource {
    gate: Notify,
    calls: Cell<usize>,
    fixture: FixtureSource,
}

impl GatedSource {
    fn calls(&self) -> usize {
        self.calls.get()
    }

    async fn wait_for_call(&self) {
        while self.calls() == 0 {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait(?Send)]
impl PageSource for GatedSource {
    async fn fetch_page(&self, page_number: u32, limit: u32) -> Result<Page, FetchError> {
        self.calls.set(self.calls.get() + 1);
        self.gate.notified().await;
        Ok(self.fixture.page(page_number, limit))
    }
}

struct NeverSource;

#[async_trait(?Send)]
impl PageSource for NeverSource {
    async fn fetch_page(&self, _page_number: u32, _limit: u32) -> Result<Page, FetchError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn concurrent_requests_issue_a_single_fetch() {
    let source = Rc::new(GatedSource::default());
    let c = FeedController::new(scenario_options(), Rc::clone(&source)).unwrap();

    let (a, b, ()) = tokio::join!(c.request_next_page(), c.request_next_page(), async {
        source.wait_for_call().await;
        source.gate.notify_one();
    });

    assert_eq!(source.calls(), 1);
    let outcomes = [a, b];
    assert!(outcomes.contains(&DriveOutcome::Skipped(SkipReason::InFlight)));
    assert!(
        outcomes
            .iter()
            .any(|o| matches!(o, DriveOutcome::Completed(Completion::Merged(s)) if s.added == 4))
    );
    assert_eq!(c.grid().item_count(), 4);
}

#[tokio::test]
async fn reset_wins_over_a_fetch_in_flight() {
    let source = Rc::new(GatedSource::default());
    let c = FeedController::new(scenario_options(), Rc::clone(&source)).unwrap();

    let (outcome, ()) = tokio::join!(c.request_next_page(), async {
        source.wait_for_call().await;
        c.reset();
        source.gate.notify_one();
    });

    assert_eq!(outcome, DriveOutcome::Completed(Completion::Stale));
    let grid = c.grid();
    assert_eq!(grid.item_count(), 0);
    assert!(!grid.state().loading());
    assert_eq!(grid.state().next_page(), 1);
}

#[tokio::test]
async fn scrolling_loads_pages_with_asymmetric_limits() {
    let c = FeedController::new(scenario_options(), FixtureSource::default()).unwrap();

    let first = c.on_viewport(Viewport::new(0, 800)).await;
    assert!(matches!(first, Some(Completion::Merged(s)) if s.added == 4));
    assert_eq!(c.grid().total_extent(), 645);

    let second = c.on_viewport(Viewport::new(400, 800)).await;
    assert!(matches!(second, Some(Completion::Merged(s)) if s.added == 10));

    let grid = c.grid();
    assert_eq!(grid.item_count(), 14);
    assert_eq!(grid.state().items()[4].id, "recipe-100020");
    assert_eq!(grid.state().items()[13].id, "recipe-100029");
    assert_eq!(c.source().calls(), 2);
}

#[tokio::test]
async fn viewport_far_from_the_end_does_not_fetch() {
    let c = FeedController::new(scenario_options(), FixtureSource::default()).unwrap();
    c.request_next_page().await;
    c.on_viewport(Viewport::new(0, 800)).await;
    assert!(c.on_viewport(Viewport::new(1500, 800)).await.is_some());
    let calls = c.source().calls();

    // 24 items -> 12 rows -> 3795 tall
    assert_eq!(c.grid().item_count(), 24);
    assert_eq!(c.grid().total_extent(), 3795);
    assert!(c.on_viewport(Viewport::new(1000, 800)).await.is_none());
    assert_eq!(c.source().calls(), calls);
}

#[tokio::test]
async fn failure_is_surfaced_and_the_next_scroll_refetches_the_same_page() {
    let source = FixtureSource::default();
    source.fail_next(FetchError::Transport("connection refused".into()));
    let c = FeedController::new(scenario_options(), source).unwrap();

    assert_eq!(
        c.on_viewport(Viewport::new(0, 800)).await,
        Some(Completion::Failed)
    );
    assert_eq!(c.grid().status(), ListStatus::Errored);
    assert_eq!(c.grid().state().next_page(), 1);

    let rescrolled = c.on_viewport(Viewport::new(0, 800)).await;
    assert!(matches!(rescrolled, Some(Completion::Merged(s)) if s.added == 4));
    assert_eq!(c.grid().state().next_page(), 2);
    assert!(c.grid().state().error().is_none());
    assert_eq!(c.source().calls(), 2);
}

#[tokio::test]
async fn explicit_retry_fetches_the_failed_page() {
    let c = FeedController::new(scenario_options(), FixtureSource::default()).unwrap();
    c.request_next_page().await;
    c.source().fail_next(FetchError::Timeout);

    assert_eq!(
        c.request_next_page().await,
        DriveOutcome::Completed(Completion::Failed)
    );
    let retried = c.retry().await;
    assert!(matches!(retried, DriveOutcome::Completed(Completion::Merged(s)) if s.added == 10));
    assert_eq!(c.grid().state().items()[4].id, "recipe-100020");
    assert_eq!(c.grid().state().next_page(), 3);
}

#[tokio::test]
async fn slow_source_times_out() {
    let source = WithTimeout::new(NeverSource, Duration::from_millis(20));
    let c = FeedController::new(scenario_options(), source).unwrap();

    assert_eq!(
        c.request_next_page().await,
        DriveOutcome::Completed(Completion::Failed)
    );
    assert_eq!(c.grid().state().error(), Some(&FetchError::Timeout));
    assert!(!c.grid().state().loading());
}

#[tokio::test]
async fn exhausted_source_stops_requesting() {
    let c = FeedController::new(scenario_options(), FixtureSource::new(2)).unwrap();
    c.request_next_page().await;
    c.request_next_page().await;

    assert_eq!(
        c.request_next_page().await,
        DriveOutcome::Skipped(SkipReason::Exhausted)
    );
    assert_eq!(c.grid().status(), ListStatus::EndOfList);
    assert_eq!(c.source().calls(), 2);
}

#[tokio::test]
async fn refresh_starts_over_from_page_one() {
    let c = FeedController::new(scenario_options(), FixtureSource::default()).unwrap();
    c.request_next_page().await;
    c.request_next_page().await;
    assert_eq!(c.grid().item_count(), 14);

    c.refresh().await;
    assert_eq!(c.grid().item_count(), 4);
    assert_eq!(c.grid().state().next_page(), 2);
}

#[tokio::test]
async fn run_loop_loads_and_forwards_clicks() {
    let c = FeedController::new(scenario_options(), FixtureSource::default()).unwrap();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (output_tx, mut output_rx) = mpsc::unbounded_channel();

    tokio::join!(c.run(events_rx, output_tx), async {
        events_tx
            .send(HostEvent::Viewport(Viewport::new(0, 800)))
            .unwrap();
        while c.grid().item_count() < 4 {
            tokio::task::yield_now().await;
        }
        events_tx.send(HostEvent::Click(1)).unwrap();
        events_tx.send(HostEvent::AddToCart(0)).unwrap();
        events_tx.send(HostEvent::Click(99)).unwrap();
        drop(events_tx);
    });

    let clicked = output_rx.recv().await.unwrap();
    assert!(matches!(&clicked, GridEvent::ItemClicked(item) if item.id == "recipe-2"));
    let added = output_rx.recv().await.unwrap();
    assert!(matches!(&added, GridEvent::AddToCart(item) if item.id == "recipe-1"));
    assert!(output_rx.recv().await.is_none());
}

#[test]
fn decode_accepts_string_and_numeric_minutes() {
    let body = br#"{
        "code": 0,
        "data": {
            "list": [
                {"id": "a", "title": "A", "image": "i", "author": "x", "category": "c", "time": "15", "likes": 5},
                {"id": "b", "title": "B", "image": "i", "author": "y", "category": "c", "time": 20, "likes": 7}
            ],
            "hasMore": true
        }
    }"#;
    let page = decode_page(3, body).unwrap();
    assert_eq!(page.page_number, 3);
    assert!(page.has_more);
    assert_eq!(page.items[0].estimated_duration_minutes, 15);
    assert_eq!(page.items[1].estimated_duration_minutes, 20);
    assert_eq!(page.items[1].author_name, "y");
}

#[test]
fn envelope_without_data_or_message_still_decodes_the_code() {
    let rejected: envelope::Envelope<envelope::PageData> =
        serde_json::from_str(r#"{"code": 5}"#).unwrap();
    assert_eq!(rejected.code, 5);
    assert!(rejected.message.is_none());
    assert!(rejected.data.is_none());

    let empty = encode_page(&Page {
        page_number: 1,
        items: Vec::new(),
        has_more: false,
    })
    .unwrap();
    let page = decode_page(1, &empty).unwrap();
    assert!(page.items.is_empty());
    assert!(!page.has_more);
}

#[test]
fn decode_rejects_non_zero_code() {
    let body = br#"{"code": 2, "message": "rate limited"}"#;
    assert_eq!(
        decode_page(1, body).unwrap_err(),
        FetchError::Rejected {
            code: 2,
            message: "rate limited".into()
        }
    );
}

#[test]
fn decode_reports_malformed_bodies() {
    assert!(matches!(decode_page(1, b"<html>"), Err(FetchError::Decode(_))));
    assert!(matches!(decode_page(1, br#"{"code": 0}"#), Err(FetchError::Decode(_))));

    let bad_time = br#"{"code": 0, "data": {"hasMore": false, "list": [
        {"id": "a", "title": "A", "image": "i", "author": "x", "category": "c", "time": "soon", "likes": 1}
    ]}}"#;
    let err = decode_page(1, bad_time).unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn fixture_content_is_stable_per_id() {
    let source = FixtureSource::default();
    let page = source.page(2, 10);
    assert_eq!(page.items.len(), 10);
    assert_eq!(item_for_id("recipe-100023").as_ref(), Some(&page.items[3]));
    assert_eq!(generated_item(23), page.items[3]);
    assert_eq!(item_for_id("preset-3").unwrap().title, "Kung pao chicken");
    assert!(item_for_id("recipe-x").is_none());

    let score = page.items[3].popularity_score;
    assert!((100..1000).contains(&score));

    assert_eq!(source.page(1, 10).items.len(), 4);
    assert_eq!(source.page(1, 2).items.len(), 4);
    assert!(source.page(9, 10).has_more);
    assert!(!source.page(10, 10).has_more);
}

#[test]
fn options_load_from_json_with_defaults() {
    let options: GridOptions =
        serde_json::from_str(r#"{"column_count": 3, "scroll_threshold": 120}"#).unwrap();
    assert_eq!(options.column_count, 3);
    assert_eq!(options.scroll_threshold, 120);
    assert_eq!(options.gap, 15);
    assert_eq!(options.estimated_item_height, 300);
    assert_eq!(options.initial_limit, 4);
    assert_eq!(options.load_more_limit, 10);
}
