//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use hotnews::busy::{busy_channel, BusyIndicator};
use hotnews::config::FeedConfig;
use hotnews::feed::{FeedController, PageSource};

/// Feed config with the gesture geometry used by the flow tests:
/// a 60-unit header that arms at 60.
pub fn gesture_config() -> FeedConfig {
    FeedConfig::default().with_gesture(60.0, 60.0)
}

/// A controller over `source` and the indicator its gate drives.
pub fn controller(source: Arc<dyn PageSource>, config: FeedConfig) -> (FeedController, BusyIndicator) {
    let (busy, indicator) = busy_channel();
    (FeedController::new(source, busy, config), indicator)
}

/// Run every pending frame until the header stops moving.
pub fn settle_animation(feed: &mut FeedController) {
    for _ in 0..500 {
        if !feed.tick() {
            return;
        }
    }
    panic!("header animation did not settle");
}

/// Dispatch a refresh and fold its result back in.
pub async fn run_refresh(feed: &mut FeedController) {
    let pending = feed.request_refresh().expect("refresh dispatched");
    let settlement = pending.run().await;
    feed.on_settled(settlement);
}

/// Dispatch an append and fold its result back in.
pub async fn run_append(feed: &mut FeedController) {
    let pending = feed.request_load_more().expect("append dispatched");
    let settlement = pending.run().await;
    feed.on_settled(settlement);
}
