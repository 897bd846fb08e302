//! Fetch gate: one request in flight per list.
//!
//! [`FetchGate::dispatch`] is synchronous. It claims the in-flight flag and
//! shows the busy indicator, then hands back a [`PendingFetch`] that
//! performs the network call. The flag is released when the resulting
//! [`FetchSettlement`] is dropped, so the owner applies the outcome to its
//! state before anything else can be dispatched.
//!
//! A dispatch while the flag is held is dropped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::source::{PageCursor, PageResult, PageSource};
use crate::busy::BusyHandle;
use crate::config::DEFAULT_LOADING_MESSAGE;
use crate::error::FeedError;
use crate::models::NewsItem;

/// Which kind of fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Re-fetch page 1 and replace everything.
    Refresh,
    /// Fetch the cursor page and concatenate.
    Append,
}

/// Classified result of one page fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Data {
        mode: FetchMode,
        items: Vec<NewsItem>,
        next_cursor: PageCursor,
    },
    Empty {
        mode: FetchMode,
        next_cursor: PageCursor,
    },
    Error {
        mode: FetchMode,
        error: FeedError,
    },
    /// Success without a result section: leaves the list as it was.
    Unchanged { mode: FetchMode },
}

impl FetchOutcome {
    /// Classify a source result for a request of `mode` at `cursor`.
    pub fn classify(
        mode: FetchMode,
        cursor: PageCursor,
        result: PageResult,
    ) -> Self {
        let next_cursor = match mode {
            FetchMode::Refresh => PageCursor::AFTER_REFRESH,
            FetchMode::Append => cursor.next(),
        };
        match result {
            Ok(None) => FetchOutcome::Unchanged { mode },
            Ok(Some(items)) if items.is_empty() => FetchOutcome::Empty { mode, next_cursor },
            Ok(Some(items)) => FetchOutcome::Data {
                mode,
                items,
                next_cursor,
            },
            Err(error) => FetchOutcome::Error { mode, error },
        }
    }

    pub fn mode(&self) -> FetchMode {
        match self {
            FetchOutcome::Data { mode, .. }
            | FetchOutcome::Empty { mode, .. }
            | FetchOutcome::Error { mode, .. }
            | FetchOutcome::Unchanged { mode } => *mode,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchOutcome::Error { .. })
    }

    /// Whether folding this outcome replaces or extends the list.
    pub fn changes_list(&self) -> bool {
        matches!(self, FetchOutcome::Data { .. } | FetchOutcome::Empty { .. })
    }

    /// Number of items carried (0 for everything but Data).
    pub fn item_count(&self) -> usize {
        match self {
            FetchOutcome::Data { items, .. } => items.len(),
            _ => 0,
        }
    }
}

/// Holds the in-flight flag; releasing it also hides the busy indicator.
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
    busy: BusyHandle,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.busy.hide();
        tracing::trace!("fetch gate released");
    }
}

/// A dispatched fetch that has not touched the network yet.
///
/// Dropping it without running releases the gate.
#[must_use = "a pending fetch holds the gate until it is run or dropped"]
pub struct PendingFetch {
    mode: FetchMode,
    cursor: PageCursor,
    source: Arc<dyn PageSource>,
    guard: InFlightGuard,
}

impl std::fmt::Debug for PendingFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingFetch")
            .field("mode", &self.mode)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl PendingFetch {
    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    /// Page that will be requested.
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Perform the request and classify the result.
    pub async fn run(self) -> FetchSettlement {
        let PendingFetch {
            mode,
            cursor,
            source,
            guard,
        } = self;

        let result = source.fetch_page(cursor).await;
        let outcome = FetchOutcome::classify(mode, cursor, result);

        match &outcome {
            FetchOutcome::Error { error, .. } => tracing::warn!(
                ?mode,
                page = cursor.get(),
                code = error.error_code(),
                %error,
                "fetch failed"
            ),
            other => tracing::debug!(
                ?mode,
                page = cursor.get(),
                items = other.item_count(),
                "fetch settled"
            ),
        }

        FetchSettlement { outcome, guard }
    }
}

/// A settled fetch. The gate stays closed until this is dropped.
#[derive(Debug)]
#[must_use = "dropping a settlement discards its outcome"]
pub struct FetchSettlement {
    outcome: FetchOutcome,
    guard: InFlightGuard,
}

impl FetchSettlement {
    pub fn outcome(&self) -> &FetchOutcome {
        &self.outcome
    }

    /// Split into the outcome and the guard; drop the guard once the
    /// outcome has been applied.
    pub fn into_parts(self) -> (FetchOutcome, InFlightGuard) {
        (self.outcome, self.guard)
    }

    /// Take the outcome and release the gate immediately.
    pub fn into_outcome(self) -> FetchOutcome {
        self.outcome
    }
}

/// Single-flight wrapper around a [`PageSource`].
#[derive(Clone)]
pub struct FetchGate {
    source: Arc<dyn PageSource>,
    in_flight: Arc<AtomicBool>,
    busy: BusyHandle,
    loading_message: String,
}

impl FetchGate {
    pub fn new(source: Arc<dyn PageSource>, busy: BusyHandle) -> Self {
        Self {
            source,
            in_flight: Arc::new(AtomicBool::new(false)),
            busy,
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
        }
    }

    /// Message handed to the busy indicator on dispatch.
    pub fn with_loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claim the gate for a fetch of `mode`.
    ///
    /// Refresh always requests page 1; Append requests `cursor`. Returns
    /// `None`, with no side effects, if a fetch is already in flight.
    pub fn dispatch(&self, mode: FetchMode, cursor: PageCursor) -> Option<PendingFetch> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(?mode, page = cursor.get(), "fetch dropped: already in flight");
            return None;
        }

        let cursor = match mode {
            FetchMode::Refresh => PageCursor::FIRST,
            FetchMode::Append => cursor,
        };
        self.busy.show(self.loading_message.clone());
        tracing::info!(?mode, page = cursor.get(), "fetch dispatched");

        Some(PendingFetch {
            mode,
            cursor,
            source: Arc::clone(&self.source),
            guard: InFlightGuard {
                flag: Arc::clone(&self.in_flight),
                busy: self.busy.clone(),
            },
        })
    }

    /// Dispatch and await in one go. `None` means the call was dropped.
    pub async fn fetch(&self, mode: FetchMode, cursor: PageCursor) -> Option<FetchOutcome> {
        let pending = self.dispatch(mode, cursor)?;
        Some(pending.run().await.into_outcome())
    }
}
