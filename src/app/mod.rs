//! Terminal application state.
//!
//! [`App`] owns one [`FeedController`], the busy indicator and the digest
//! tab. It never blocks: network work is spawned on the tokio runtime and
//! reports back through [`AppMessage`]s on `message_tx`.

mod handlers;
mod messages;

pub use messages::AppMessage;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::busy::{busy_channel, BusyHandle, BusyIndicator};
use crate::config::FeedConfig;
use crate::digest::{DailyDigestClient, RetryPolicy};
use crate::feed::{FeedController, HotNewsSource, PageSource, PendingFetch, ScrollMetrics};
use crate::models::DailyDigest;
use crate::navigation::Navigator;
use crate::traits::HttpClient;

/// Rows taken by one news item in the list.
pub const ITEM_ROWS: usize = 2;

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    HotNews,
    Digest,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::HotNews, Tab::Digest];

    pub fn title(self) -> &'static str {
        match self {
            Tab::HotNews => "Hot news",
            Tab::Digest => "Daily digest",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::HotNews => 0,
            Tab::Digest => 1,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Tab::HotNews => Tab::Digest,
            Tab::Digest => Tab::HotNews,
        }
    }
}

/// Daily digest tab state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DigestState {
    #[default]
    NotLoaded,
    Loading,
    Loaded(DailyDigest),
    Failed(String),
}

/// Digest fetcher as held by the app.
pub type SharedDigestClient = Arc<DailyDigestClient<Arc<dyn HttpClient>>>;

pub struct App {
    pub tab: Tab,
    pub feed: FeedController,
    pub busy: BusyIndicator,
    pub digest: DigestState,
    /// Index of the highlighted news item
    pub selected: usize,
    /// First visible list row; always a multiple of [`ITEM_ROWS`]
    pub scroll_offset: usize,
    /// Rows available to list items, set by the renderer
    pub viewport_rows: u16,
    /// Transient one-line notice (navigation failures and the like)
    pub notice: Option<String>,
    pub should_quit: bool,
    pub needs_redraw: bool,
    /// Frame counter for the spinner
    pub tick_count: u64,
    /// Taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    busy_handle: BusyHandle,
    digest_client: SharedDigestClient,
    navigator: Box<dyn Navigator>,
    /// Row where a pull gesture started
    drag_origin: Option<u16>,
}

impl App {
    /// Production wiring: both tabs fetch through `http`.
    pub fn new(config: FeedConfig, http: Arc<dyn HttpClient>, navigator: Box<dyn Navigator>) -> Self {
        let source: Arc<dyn PageSource> = Arc::new(HotNewsSource::new(http.clone(), &config));
        let digest = Arc::new(DailyDigestClient::new(http, &config));
        Self::with_parts(config, source, digest, navigator)
    }

    /// Wiring with an explicit page source and digest client.
    pub fn with_parts(
        config: FeedConfig,
        source: Arc<dyn PageSource>,
        digest_client: SharedDigestClient,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        let (busy_handle, busy) = busy_channel();
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            tab: Tab::HotNews,
            feed: FeedController::new(source, busy_handle.clone(), config),
            busy,
            digest: DigestState::NotLoaded,
            selected: 0,
            scroll_offset: 0,
            viewport_rows: 0,
            notice: None,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_rx: Some(message_rx),
            message_tx,
            busy_handle,
            digest_client,
            navigator,
            drag_origin: None,
        }
    }

    /// Digest client that fails fast; for tests and `--print`-style use.
    pub fn digest_client_without_retries(
        http: Arc<dyn HttpClient>,
        config: &FeedConfig,
    ) -> SharedDigestClient {
        Arc::new(DailyDigestClient::new(http, config).with_retry_policy(RetryPolicy::none()))
    }

    /// Kick off the first page load.
    pub fn start(&mut self) {
        let pending = self.feed.request_refresh();
        self.spawn_fetch(pending);
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Total list height in rows.
    pub fn content_rows(&self) -> usize {
        self.feed.items().len() * ITEM_ROWS
    }

    pub fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(
            self.scroll_offset as f32,
            self.viewport_rows as f32,
            self.content_rows() as f32,
        )
    }

    /// Record the list height the renderer had room for.
    pub fn set_viewport_rows(&mut self, rows: u16) {
        if self.viewport_rows != rows {
            self.viewport_rows = rows;
            self.clamp_scroll();
        }
    }

    /// Run a dispatched fetch on the runtime and report back.
    ///
    /// `None` means the controller refused the request; nothing to do.
    pub(crate) fn spawn_fetch(&mut self, pending: Option<PendingFetch>) {
        let Some(pending) = pending else {
            return;
        };
        self.mark_dirty();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let settlement = pending.run().await;
            if tx.send(AppMessage::FeedSettled(settlement)).is_err() {
                // app is gone; dropping the settlement releases the gate
                tracing::debug!("feed settled after shutdown");
            }
        });
    }

    /// Fetch the daily digest unless a fetch is already running.
    pub fn load_digest(&mut self) {
        if self.digest == DigestState::Loading {
            return;
        }
        self.digest = DigestState::Loading;
        self.mark_dirty();

        let client = Arc::clone(&self.digest_client);
        let busy = self.busy_handle.clone();
        let tx = self.message_tx.clone();
        let message = self.feed.config().loading_message.clone();
        tokio::spawn(async move {
            busy.show(message);
            let result = client.fetch().await;
            busy.hide();
            if tx.send(AppMessage::DigestLoaded(result)).is_err() {
                tracing::debug!("digest loaded after shutdown");
            }
        });
    }

    /// Ask the navigator to open the selected item.
    pub fn open_selected(&mut self) {
        match self.feed.open_detail(self.selected, self.navigator.as_ref()) {
            Ok(_) => self.notice = None,
            Err(err) => {
                tracing::warn!(error = %err, "could not open detail");
                self.notice = Some(err.to_string());
            }
        }
        self.mark_dirty();
    }

    /// Ask the navigator to open the digest image.
    pub fn open_digest(&mut self) {
        let DigestState::Loaded(digest) = &self.digest else {
            return;
        };
        if let Err(err) = self
            .navigator
            .navigate_to_detail(&digest.image_url, Tab::Digest.title())
        {
            tracing::warn!(error = %err, "could not open digest");
            self.notice = Some(err.to_string());
        }
        self.mark_dirty();
    }

    pub fn select_next(&mut self) {
        let len = self.feed.items().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
        self.ensure_selected_visible();
        self.after_scroll();
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.ensure_selected_visible();
        self.mark_dirty();
    }

    /// Scroll by whole items; positive is down.
    pub fn scroll_items(&mut self, delta: isize) {
        let step = delta.unsigned_abs() * ITEM_ROWS;
        self.scroll_offset = if delta < 0 {
            self.scroll_offset.saturating_sub(step)
        } else {
            self.scroll_offset + step
        };
        self.clamp_scroll();

        let first_visible = self.scroll_offset / ITEM_ROWS;
        let visible_items = (self.viewport_rows as usize / ITEM_ROWS).max(1);
        if self.selected < first_visible {
            self.selected = first_visible;
        } else if self.selected >= first_visible + visible_items {
            self.selected = first_visible + visible_items - 1;
        }
        let len = self.feed.items().len();
        if len > 0 && self.selected >= len {
            self.selected = len - 1;
        }

        if delta > 0 {
            self.after_scroll();
        } else {
            self.mark_dirty();
        }
    }

    /// Whether the list is scrolled all the way up, so a drag pulls the header.
    pub fn at_top(&self) -> bool {
        self.scroll_offset == 0
    }

    fn ensure_selected_visible(&mut self) {
        let top = self.selected * ITEM_ROWS;
        let viewport = self.viewport_rows as usize;
        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if viewport >= ITEM_ROWS && top + ITEM_ROWS > self.scroll_offset + viewport {
            let rows = top + ITEM_ROWS - viewport;
            self.scroll_offset = rows.div_ceil(ITEM_ROWS) * ITEM_ROWS;
        }
    }

    fn clamp_scroll(&mut self) {
        let max = self
            .content_rows()
            .saturating_sub(self.viewport_rows as usize);
        let max = max.div_ceil(ITEM_ROWS) * ITEM_ROWS;
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }

    /// Near-end check after the list moved down.
    fn after_scroll(&mut self) {
        let pending = self.feed.on_scroll(self.scroll_metrics());
        self.spawn_fetch(pending);
        self.mark_dirty();
    }

    pub(crate) fn begin_drag(&mut self, row: u16) {
        if self.tab == Tab::HotNews && self.at_top() {
            self.drag_origin = Some(row);
        }
    }

    pub(crate) fn continue_drag(&mut self, row: u16) {
        if let Some(origin) = self.drag_origin {
            self.feed.on_drag(row as f32 - origin as f32);
            self.mark_dirty();
        }
    }

    pub(crate) fn end_drag(&mut self) {
        if self.drag_origin.take().is_some() {
            let pending = self.feed.on_release();
            self.spawn_fetch(pending);
            self.mark_dirty();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }
}
