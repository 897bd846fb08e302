//! Accumulated list state and the reducer that folds fetch outcomes into it.

use super::gate::{FetchMode, FetchOutcome};
use super::source::PageCursor;
use crate::error::FeedError;
use crate::models::NewsItem;

/// Items loaded so far plus the cursor for the next page.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    items: Vec<NewsItem>,
    cursor: PageCursor,
    has_more: bool,
    last_error: Option<String>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: PageCursor::FIRST,
            has_more: true,
            last_error: None,
        }
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page the next append will request.
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// User-facing message of the most recent failure, if not yet cleared.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether an append may be requested from this state.
    pub fn can_append(&self) -> bool {
        self.has_more
    }

    /// Replace everything with a fresh page 1.
    ///
    /// An empty page 1 empties the list and turns `has_more` off.
    pub fn apply_refresh(&mut self, items: Vec<NewsItem>) {
        self.has_more = !items.is_empty();
        self.items = items;
        self.cursor = PageCursor::AFTER_REFRESH;
        self.last_error = None;
    }

    /// Concatenate a later page. Duplicates are kept as-is.
    ///
    /// The cursor always moves one page forward. An empty page flips
    /// `has_more` off.
    pub fn apply_append(&mut self, items: Vec<NewsItem>) {
        self.cursor = self.cursor.next();
        self.has_more = !items.is_empty();
        self.items.extend(items);
        self.last_error = None;
    }

    /// Record a failure. Items, cursor and `has_more` are untouched.
    pub fn apply_error(&mut self, error: &FeedError) {
        self.last_error = Some(error.user_message());
    }

    /// Fold a classified outcome into the state.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Data {
                mode: FetchMode::Refresh,
                items,
                ..
            } => self.apply_refresh(items),
            FetchOutcome::Empty {
                mode: FetchMode::Refresh,
                ..
            } => self.apply_refresh(Vec::new()),
            FetchOutcome::Data {
                mode: FetchMode::Append,
                items,
                ..
            } => self.apply_append(items),
            FetchOutcome::Empty {
                mode: FetchMode::Append,
                ..
            } => self.apply_append(Vec::new()),
            FetchOutcome::Unchanged { .. } => self.last_error = None,
            FetchOutcome::Error { error, .. } => self.apply_error(&error),
        }
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(prefix: &str, n: usize) -> Vec<NewsItem> {
        (0..n)
            .map(|i| NewsItem::new(format!("{}{}", prefix, i), format!("title {}", i)))
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let state = PaginationState::new();
        assert!(state.is_empty());
        assert_eq!(state.cursor(), PageCursor::FIRST);
        assert!(state.has_more());
        assert!(state.can_append());
        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn test_refresh_replaces_and_sets_cursor() {
        let mut state = PaginationState::new();
        state.apply_append(page("a", 5));
        state.apply_refresh(page("b", 3));

        assert_eq!(state.len(), 3);
        assert_eq!(state.items()[0].id, "b0");
        assert_eq!(state.cursor(), PageCursor::AFTER_REFRESH);
        assert!(state.has_more());
    }

    #[test]
    fn test_empty_refresh_clears_list_and_stops_paging() {
        let mut state = PaginationState::new();
        state.apply_refresh(page("a", 10));
        state.apply(FetchOutcome::Empty {
            mode: FetchMode::Refresh,
            next_cursor: PageCursor::AFTER_REFRESH,
        });

        assert!(state.is_empty());
        assert!(!state.has_more());
        assert!(!state.can_append());
    }

    #[test]
    fn test_append_concatenates_in_order() {
        let mut state = PaginationState::new();
        state.apply_refresh(page("p1-", 10));
        state.apply(FetchOutcome::Data {
            mode: FetchMode::Append,
            items: page("p2-", 10),
            next_cursor: PageCursor::new(3),
        });

        assert_eq!(state.len(), 20);
        assert_eq!(state.items()[9].id, "p1-9");
        assert_eq!(state.items()[10].id, "p2-0");
        assert_eq!(state.cursor(), PageCursor::new(3));
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let mut state = PaginationState::new();
        state.apply_refresh(page("x", 2));
        state.apply_append(page("x", 2));
        assert_eq!(state.len(), 4);
        assert_eq!(state.items()[0].id, state.items()[2].id);
    }

    #[test]
    fn test_empty_append_marks_end() {
        let mut state = PaginationState::new();
        state.apply_refresh(page("a", 10));
        state.apply(FetchOutcome::Empty {
            mode: FetchMode::Append,
            next_cursor: PageCursor::new(3),
        });

        assert_eq!(state.len(), 10);
        assert!(!state.has_more());
        assert_eq!(state.cursor(), PageCursor::new(3));
    }

    #[test]
    fn test_error_leaves_list_untouched() {
        let mut state = PaginationState::new();
        state.apply_refresh(page("a", 10));
        let before_cursor = state.cursor();

        state.apply(FetchOutcome::Error {
            mode: FetchMode::Append,
            error: FeedError::TransportTimeout { duration_secs: 10 },
        });

        assert_eq!(state.len(), 10);
        assert_eq!(state.cursor(), before_cursor);
        assert!(state.has_more());
        assert_eq!(
            state.last_error(),
            Some("Request timed out, please check your network connection")
        );
    }

    #[test]
    fn test_success_clears_error() {
        let mut state = PaginationState::new();
        state.apply_error(&FeedError::application("quota exceeded"));
        assert_eq!(state.last_error(), Some("quota exceeded"));

        state.apply_refresh(page("a", 1));
        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn test_refresh_after_end_resumes_paging() {
        let mut state = PaginationState::new();
        state.apply_refresh(page("a", 10));
        state.apply_append(Vec::new());
        assert!(!state.can_append());

        state.apply_refresh(page("b", 10));
        assert!(state.can_append());
        assert_eq!(state.cursor(), PageCursor::AFTER_REFRESH);
    }

    #[test]
    fn test_append_advances_cursor_by_one() {
        let mut state = PaginationState::new();
        state.apply_refresh(page("a", 10));
        state.apply_append(page("b", 10));
        state.apply_append(page("c", 10));
        assert_eq!(state.cursor(), PageCursor::new(4));
        assert_eq!(state.len(), 30);
    }

    #[test]
    fn test_unchanged_outcome_keeps_list_and_cursor() {
        let mut state = PaginationState::new();
        state.apply_refresh(page("a", 10));
        state.apply_error(&FeedError::application("stale"));
        let before = state.items().to_vec();

        state.apply(FetchOutcome::Unchanged {
            mode: FetchMode::Append,
        });

        assert_eq!(state.items(), &before[..]);
        assert_eq!(state.cursor(), PageCursor::AFTER_REFRESH);
        assert!(state.has_more());
        assert_eq!(state.last_error(), None);

        state.apply(FetchOutcome::Unchanged {
            mode: FetchMode::Refresh,
        });
        assert_eq!(state.len(), 10);
        assert!(state.can_append());
    }

    #[test]
    fn test_reset() {
        let mut state = PaginationState::new();
        state.apply_refresh(page("a", 3));
        state.apply_error(&FeedError::application("x"));
        state.reset();
        assert_eq!(state, PaginationState::new());
    }
}
