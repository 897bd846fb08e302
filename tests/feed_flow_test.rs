//! End-to-end behaviour of one feed list: gate, pagination and the pull
//! gesture driven through [`FeedController`] against a scripted source.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use hotnews::error::FeedError;
use hotnews::feed::{FetchMode, FooterState, PageCursor, RefreshPhase, ScrollMetrics};

#[tokio::test]
async fn test_appends_keep_order_and_sum_lengths() {
    let source = MockPageSource::new();
    source
        .push_page(news_batch("a", 10))
        .push_page(news_batch("b", 10))
        .push_page(news_batch("c", 4));
    let (mut feed, _busy) = controller(Arc::new(source.clone()), gesture_config());

    run_refresh(&mut feed).await;
    run_append(&mut feed).await;
    run_append(&mut feed).await;

    assert_eq!(feed.items().len(), 24);
    assert_eq!(feed.items()[0].id, "a0");
    assert_eq!(feed.items()[10].id, "b0");
    assert_eq!(feed.items()[23].id, "c3");
    assert_eq!(
        source.calls(),
        vec![PageCursor::new(1), PageCursor::new(2), PageCursor::new(3)]
    );
    assert_eq!(feed.state().cursor(), PageCursor::new(4));
}

#[tokio::test]
async fn test_end_of_list_sticks_until_refresh() {
    let source = MockPageSource::new();
    source
        .push_page(news_batch("a", 10))
        .push_page(Vec::new())
        .push_page(news_batch("fresh", 10));
    let (mut feed, _busy) = controller(Arc::new(source.clone()), gesture_config());

    run_refresh(&mut feed).await;
    run_append(&mut feed).await;
    assert!(!feed.state().has_more());

    // nothing reaches the source while the end is reached
    assert!(feed.request_load_more().is_none());
    assert!(feed
        .on_scroll(ScrollMetrics::new(20.0, 10.0, 20.0))
        .is_none());
    assert_eq!(source.call_count(), 2);

    run_refresh(&mut feed).await;
    assert!(feed.state().has_more());
    assert_eq!(feed.items()[0].id, "fresh0");
    assert_eq!(feed.items().len(), 10);
}

#[tokio::test]
async fn test_second_dispatch_while_in_flight_is_dropped() {
    let source = MockPageSource::new();
    source.push_page(news_batch("a", 10));
    source.set_delay(Duration::from_millis(20));
    let (mut feed, mut busy) = controller(Arc::new(source.clone()), gesture_config());

    let pending = feed.request_refresh().unwrap();
    assert!(feed.is_in_flight());
    assert!(feed.request_refresh().is_none());
    assert!(feed.request_load_more().is_none());
    assert!(feed.retry().is_none());

    let settlement = tokio::spawn(pending.run()).await.unwrap();
    feed.on_settled(settlement);

    assert_eq!(source.call_count(), 1);
    assert!(!feed.is_in_flight());
    busy.drain();
    assert!(!busy.is_visible());
}

#[test]
fn test_repeated_drag_in_same_band_is_one_transition() {
    let (mut feed, _busy) = controller(Arc::new(MockPageSource::new()), gesture_config());

    for _ in 0..5 {
        feed.on_drag(30.0);
    }

    assert_eq!(feed.phase(), RefreshPhase::Pulling);
    assert_eq!(feed.transition_count(), 1);
}

#[tokio::test]
async fn test_release_when_ready_runs_full_cycle() {
    let source = MockPageSource::new();
    source.push_page(news_batch("a", 10));
    let (mut feed, _busy) = controller(Arc::new(source.clone()), gesture_config());

    feed.on_drag(75.0);
    assert_eq!(feed.phase(), RefreshPhase::Ready);

    let pending = feed.on_release().expect("release in Ready dispatches");
    assert_eq!(pending.mode(), FetchMode::Refresh);
    assert_eq!(feed.phase(), RefreshPhase::Refreshing);
    assert!(feed.on_release().is_none());

    feed.on_settled(pending.run().await);
    assert_eq!(feed.phase(), RefreshPhase::Finished);

    settle_animation(&mut feed);
    assert_eq!(feed.phase(), RefreshPhase::Idle);
    assert_eq!(feed.header_rows(), 0);
    assert_eq!(source.call_count(), 1);
}

#[test]
fn test_release_below_threshold_does_not_fetch() {
    let source = MockPageSource::new();
    let (mut feed, _busy) = controller(Arc::new(source.clone()), gesture_config());

    feed.on_drag(20.0);
    assert!(feed.on_release().is_none());
    assert_eq!(feed.phase(), RefreshPhase::Idle);
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_drag_sequence_arms_and_refreshes() {
    let source = MockPageSource::new();
    source.push_page(news_batch("a", 5));
    let (mut feed, _busy) = controller(Arc::new(source.clone()), gesture_config());

    let mut phases = Vec::new();
    for distance in [10.0, 40.0, 70.0] {
        feed.on_drag(distance);
        phases.push(feed.phase());
    }
    assert_eq!(
        phases,
        vec![RefreshPhase::Pulling, RefreshPhase::Pulling, RefreshPhase::Ready]
    );

    let pending = feed.on_release().unwrap();
    assert_eq!(feed.phase(), RefreshPhase::Refreshing);
    assert_eq!(feed.header_label(), Some("Refreshing..."));
    feed.on_settled(pending.run().await);

    assert_eq!(source.calls(), vec![PageCursor::FIRST]);
}

#[tokio::test]
async fn test_empty_append_shows_no_more() {
    let source = MockPageSource::new();
    source.push_page(news_batch("a", 10)).push_page(Vec::new());
    let (mut feed, _busy) = controller(Arc::new(source.clone()), gesture_config());

    run_refresh(&mut feed).await;
    assert_eq!(feed.footer(), Some(FooterState::PullForMore));

    let pending = feed
        .on_scroll(ScrollMetrics::new(10.0, 10.0, 20.0))
        .expect("bottom of the list loads more");
    assert_eq!(feed.footer(), Some(FooterState::Loading));
    feed.on_settled(pending.run().await);

    assert!(!feed.state().has_more());
    assert_eq!(feed.items().len(), 10);
    assert_eq!(feed.footer().map(FooterState::label), Some("No more news"));
}

#[tokio::test]
async fn test_scroll_during_append_does_not_double_fetch() {
    let source = MockPageSource::new();
    source
        .push_page(news_batch("a", 10))
        .push_page(news_batch("b", 10));
    source.set_delay(Duration::from_millis(10));
    let (mut feed, _busy) = controller(Arc::new(source.clone()), gesture_config());

    run_refresh(&mut feed).await;

    let near_end = ScrollMetrics::new(10.0, 10.0, 20.0);
    let pending = feed.on_scroll(near_end).unwrap();
    assert!(feed.on_scroll(near_end).is_none());
    assert!(feed.on_scroll(near_end).is_none());
    feed.on_settled(pending.run().await);

    assert_eq!(source.call_count(), 2);
    assert_eq!(feed.items().len(), 20);
}

#[tokio::test]
async fn test_application_error_keeps_items_and_retry_clears_it() {
    let source = MockPageSource::new();
    source
        .push_page(news_batch("a", 10))
        .push_error(FeedError::application("invalid key"))
        .push_page(news_batch("b", 10));
    let (mut feed, _busy) = controller(Arc::new(source.clone()), gesture_config());

    run_refresh(&mut feed).await;
    run_append(&mut feed).await;

    assert_eq!(feed.last_error(), Some("invalid key"));
    assert_eq!(feed.items().len(), 10);
    assert_eq!(feed.items()[0].id, "a0");
    assert!(feed.state().has_more());

    let pending = feed.retry().unwrap();
    assert_eq!(feed.last_error(), None);
    assert_eq!(pending.mode(), FetchMode::Refresh);
    assert_eq!(pending.cursor(), PageCursor::FIRST);
    feed.on_settled(pending.run().await);

    assert_eq!(feed.items()[0].id, "b0");
    assert_eq!(source.calls().last(), Some(&PageCursor::FIRST));
}

#[tokio::test]
async fn test_failed_pull_refresh_still_closes_header() {
    let source = MockPageSource::new();
    source.push_error(FeedError::TransportTimeout { duration_secs: 10 });
    let (mut feed, _busy) = controller(Arc::new(source.clone()), gesture_config());

    feed.on_drag(80.0);
    let pending = feed.on_release().unwrap();
    feed.on_settled(pending.run().await);

    assert_eq!(feed.phase(), RefreshPhase::Finished);
    assert!(feed.last_error().unwrap().contains("timed out"));
    settle_animation(&mut feed);
    assert_eq!(feed.phase(), RefreshPhase::Idle);
}

#[tokio::test]
async fn test_pull_while_programmatic_refresh_in_flight_closes_header() {
    let source = MockPageSource::new();
    source.push_page(news_batch("a", 3));
    let (mut feed, _busy) = controller(Arc::new(source.clone()), gesture_config());

    let pending = feed.request_refresh().unwrap();
    feed.on_drag(80.0);
    assert!(feed.on_release().is_none());
    assert_ne!(feed.phase(), RefreshPhase::Refreshing);

    feed.on_settled(pending.run().await);
    settle_animation(&mut feed);
    assert_eq!(feed.phase(), RefreshPhase::Idle);
    assert_eq!(source.call_count(), 1);
}
