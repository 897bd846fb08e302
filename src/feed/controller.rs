//! One news list: pagination state, refresh gesture and fetch gate wired
//! together.
//!
//! The controller never awaits. Every request that reaches the network
//! comes back as a [`PendingFetch`]; the caller runs it (usually on a
//! spawned task) and hands the [`FetchSettlement`] back to
//! [`FeedController::on_settled`].

use std::sync::Arc;

use super::animation::HeaderAnimator;
use super::gate::{FetchGate, FetchMode, FetchSettlement, PendingFetch};
use super::pagination::PaginationState;
use super::refresh::{GestureEvent, RefreshConfig, RefreshEffect, RefreshMachine, RefreshPhase};
use super::source::PageSource;
use super::surface::{footer_state, item_key, should_load_more, FooterState, ScrollMetrics};
use crate::busy::BusyHandle;
use crate::config::FeedConfig;
use crate::error::AppResult;
use crate::models::NewsItem;
use crate::navigation::Navigator;

pub struct FeedController {
    config: FeedConfig,
    state: PaginationState,
    machine: RefreshMachine,
    animator: HeaderAnimator,
    gate: FetchGate,
    pending_mode: Option<FetchMode>,
}

impl FeedController {
    pub fn new(source: Arc<dyn PageSource>, busy: BusyHandle, config: FeedConfig) -> Self {
        let gate = FetchGate::new(source, busy).with_loading_message(config.loading_message.clone());
        let gesture = RefreshConfig::new(config.header_height, config.refresh_threshold);
        Self {
            state: PaginationState::new(),
            machine: RefreshMachine::new(gesture),
            animator: HeaderAnimator::new(config.header_height),
            gate,
            pending_mode: None,
            config,
        }
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn items(&self) -> &[NewsItem] {
        self.state.items()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error()
    }

    pub fn phase(&self) -> RefreshPhase {
        self.machine.phase()
    }

    pub fn transition_count(&self) -> u64 {
        self.machine.transition_count()
    }

    /// Current header height, animated.
    pub fn header_offset(&self) -> f32 {
        self.animator.offset()
    }

    pub fn header_rows(&self) -> u16 {
        self.animator.rows()
    }

    pub fn header_label(&self) -> Option<&'static str> {
        self.machine.phase().label()
    }

    pub fn is_in_flight(&self) -> bool {
        self.gate.is_in_flight()
    }

    /// An append is on the wire.
    pub fn is_loading_more(&self) -> bool {
        self.gate.is_in_flight() && self.pending_mode == Some(FetchMode::Append)
    }

    pub fn footer(&self) -> Option<FooterState> {
        footer_state(
            self.state.len(),
            self.is_loading_more(),
            self.state.has_more(),
        )
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Programmatic refresh; does not drive the header.
    pub fn request_refresh(&mut self) -> Option<PendingFetch> {
        self.dispatch(FetchMode::Refresh)
    }

    /// Fetch the next page, unless the end has been reached.
    pub fn request_load_more(&mut self) -> Option<PendingFetch> {
        if !self.state.can_append() {
            tracing::debug!(page = self.state.cursor().get(), "load more suppressed: no more pages");
            return None;
        }
        self.dispatch(FetchMode::Append)
    }

    /// Clear the last error and refresh from page 1.
    pub fn retry(&mut self) -> Option<PendingFetch> {
        if self.gate.is_in_flight() {
            return None;
        }
        self.state.clear_error();
        self.dispatch(FetchMode::Refresh)
    }

    /// Scroll position changed.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<PendingFetch> {
        if !should_load_more(
            metrics,
            self.config.end_reached_threshold,
            self.gate.is_in_flight(),
            self.state.has_more(),
        ) {
            return None;
        }
        self.request_load_more()
    }

    /// Pull distance past the top edge changed.
    pub fn on_drag(&mut self, distance: f32) {
        if self.machine.is_refreshing() {
            return;
        }
        self.machine.handle(GestureEvent::Drag(distance));
        self.animator.set_offset(self.machine.offset());
    }

    /// Pull released. Returns the refresh fetch if the release armed one.
    pub fn on_release(&mut self) -> Option<PendingFetch> {
        let transition = self.machine.handle(GestureEvent::Release)?;
        self.apply_effects(&transition.effects)
    }

    /// Fold a finished fetch into the list, then release the gate.
    pub fn on_settled(&mut self, settlement: FetchSettlement) {
        let (outcome, guard) = settlement.into_parts();
        let mode = outcome.mode();

        self.state.apply(outcome);
        self.pending_mode = None;
        tracing::info!(
            ?mode,
            items = self.state.len(),
            cursor = self.state.cursor().get(),
            has_more = self.state.has_more(),
            error = self.state.last_error(),
            "feed updated"
        );

        if mode == FetchMode::Refresh {
            self.settle_refresh();
        }
        drop(guard);
    }

    /// Advance the header animation by one frame.
    ///
    /// Returns true while something on screen is still moving.
    pub fn tick(&mut self) -> bool {
        let arrived = self.animator.tick();
        if arrived {
            self.machine.handle(GestureEvent::AnimationFinished);
        }
        arrived || self.animator.is_animating()
    }

    /// Hand the item at `index` to `navigator`. Returns false if there is
    /// no such item.
    pub fn open_detail(&self, index: usize, navigator: &dyn Navigator) -> AppResult<bool> {
        let Some(item) = self.state.items().get(index) else {
            return Ok(false);
        };
        tracing::info!(key = %item_key(item, index), url = %item.url, "opening detail");
        navigator.navigate_to_detail(&item.url, &item.title)?;
        Ok(true)
    }

    fn dispatch(&mut self, mode: FetchMode) -> Option<PendingFetch> {
        let pending = self.gate.dispatch(mode, self.state.cursor())?;
        self.state.clear_error();
        self.pending_mode = Some(mode);
        Some(pending)
    }

    fn apply_effects(&mut self, effects: &[RefreshEffect]) -> Option<PendingFetch> {
        let mut pending = None;
        for effect in effects {
            match effect {
                RefreshEffect::AnimateHeader(target) => self.animator.animate_to(*target),
                RefreshEffect::DispatchRefresh => {
                    pending = self.dispatch(FetchMode::Refresh);
                    if pending.is_none() {
                        // gate busy: nothing will settle this refresh
                        self.settle_refresh();
                    }
                }
            }
        }
        pending
    }

    fn settle_refresh(&mut self) {
        if let Some(transition) = self.machine.handle(GestureEvent::RefreshSettled) {
            for effect in &transition.effects {
                if let RefreshEffect::AnimateHeader(target) = effect {
                    self.animator.animate_to(*target);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{news_batch, MockPageSource};
    use crate::busy::busy_channel;
    use crate::feed::PageCursor;
    use crate::navigation::RecordingNavigator;

    fn controller(source: &Arc<MockPageSource>) -> FeedController {
        let (busy, _indicator) = busy_channel();
        let config = FeedConfig::default().with_gesture(3.0, 3.0);
        FeedController::new(source.clone(), busy, config)
    }

    fn run_to_idle(feed: &mut FeedController) {
        for _ in 0..100 {
            feed.tick();
            if feed.phase() == RefreshPhase::Idle && feed.header_offset() == 0.0 {
                return;
            }
        }
        panic!("header never settled");
    }

    #[tokio::test]
    async fn test_pull_release_refreshes_and_closes_header() {
        let source = Arc::new(MockPageSource::new());
        source.push_page(news_batch("a", 10));
        let mut feed = controller(&source);

        feed.on_drag(1.0);
        assert_eq!(feed.phase(), RefreshPhase::Pulling);
        assert_eq!(feed.header_label(), Some("Pull to refresh"));
        feed.on_drag(4.0);
        assert_eq!(feed.phase(), RefreshPhase::Ready);

        let pending = feed.on_release().expect("refresh dispatched");
        assert_eq!(feed.phase(), RefreshPhase::Refreshing);
        assert!(feed.is_in_flight());
        assert!(!feed.is_loading_more());

        feed.on_settled(pending.run().await);
        assert_eq!(feed.phase(), RefreshPhase::Finished);
        assert_eq!(feed.items().len(), 10);
        assert!(!feed.is_in_flight());

        run_to_idle(&mut feed);
        assert_eq!(source.calls(), vec![PageCursor::FIRST]);
    }

    #[test]
    fn test_release_below_threshold_does_not_fetch() {
        let source = Arc::new(MockPageSource::new());
        let mut feed = controller(&source);

        feed.on_drag(1.0);
        assert!(feed.on_release().is_none());
        assert_eq!(feed.phase(), RefreshPhase::Idle);
        assert!(!feed.is_in_flight());
    }

    #[tokio::test]
    async fn test_release_while_append_in_flight_closes_header() {
        let source = Arc::new(MockPageSource::new());
        let mut feed = controller(&source);

        let append = feed.request_load_more().unwrap();
        feed.on_drag(5.0);
        assert!(feed.on_release().is_none());
        // refused refresh settles immediately
        assert_eq!(feed.phase(), RefreshPhase::Finished);

        feed.on_settled(append.run().await);
        run_to_idle(&mut feed);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_footer_loading_only_for_append() {
        let source = Arc::new(MockPageSource::new());
        source.push_page(news_batch("a", 5)).push_page(news_batch("b", 5));
        let mut feed = controller(&source);

        let refresh = feed.request_refresh().unwrap();
        feed.on_settled(refresh.run().await);
        assert_eq!(feed.footer(), Some(FooterState::PullForMore));

        let append = feed.request_load_more().unwrap();
        assert_eq!(feed.footer(), Some(FooterState::Loading));
        feed.on_settled(append.run().await);
        assert_eq!(feed.items().len(), 10);
        assert_eq!(feed.footer(), Some(FooterState::PullForMore));
    }

    #[tokio::test]
    async fn test_on_scroll_near_end_appends() {
        let source = Arc::new(MockPageSource::new());
        let mut feed = controller(&source);

        assert!(feed.on_scroll(ScrollMetrics::new(0.0, 10.0, 100.0)).is_none());
        let pending = feed.on_scroll(ScrollMetrics::new(90.0, 10.0, 100.0));
        assert_eq!(pending.as_ref().map(|p| p.mode()), Some(FetchMode::Append));
        // a second near-end event while in flight is dropped
        assert!(feed.on_scroll(ScrollMetrics::new(91.0, 10.0, 100.0)).is_none());
        drop(pending);
    }

    #[tokio::test]
    async fn test_open_detail_forwards_url_and_title() {
        let source = Arc::new(MockPageSource::new());
        source.push_page(news_batch("a", 2));
        let mut feed = controller(&source);
        let refresh = feed.request_refresh().unwrap();
        feed.on_settled(refresh.run().await);

        let nav = RecordingNavigator::new();
        assert!(feed.open_detail(1, &nav).unwrap());
        assert!(!feed.open_detail(5, &nav).unwrap());
        assert_eq!(
            nav.visits(),
            vec![("https://news.test/a1".to_string(), "a headline 1".to_string())]
        );
    }
}
