//! Presentation rules for the news list that do not depend on a backend:
//! footer choice, near-end detection, row keys and time labels.

use chrono::NaiveDateTime;

use crate::models::NewsItem;

/// What the list footer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterState {
    Loading,
    NoMore,
    PullForMore,
}

impl FooterState {
    pub fn label(self) -> &'static str {
        match self {
            FooterState::Loading => "Loading...",
            FooterState::NoMore => "No more news",
            FooterState::PullForMore => "Pull up for more news",
        }
    }
}

/// Footer for the current list; `None` while the list is empty.
pub fn footer_state(items_len: usize, loading: bool, has_more: bool) -> Option<FooterState> {
    if items_len == 0 {
        return None;
    }
    Some(if loading {
        FooterState::Loading
    } else if !has_more {
        FooterState::NoMore
    } else {
        FooterState::PullForMore
    })
}

/// Scroll position, all in the same unit (rows for the terminal).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub offset: f32,
    /// Visible height.
    pub viewport: f32,
    /// Total content height.
    pub content: f32,
}

impl ScrollMetrics {
    pub fn new(offset: f32, viewport: f32, content: f32) -> Self {
        Self {
            offset,
            viewport,
            content,
        }
    }

    /// Content left below the visible area.
    pub fn distance_from_end(&self) -> f32 {
        self.content - (self.offset + self.viewport)
    }
}

/// Near-end check that gates append requests.
///
/// True when less than `threshold_fraction` of a viewport remains below the
/// visible area, nothing is in flight, and more pages exist.
pub fn should_load_more(
    metrics: ScrollMetrics,
    threshold_fraction: f32,
    in_flight: bool,
    has_more: bool,
) -> bool {
    if in_flight || !has_more {
        return false;
    }
    metrics.distance_from_end() < threshold_fraction * metrics.viewport
}

/// Render key for the item at `index`. Upstream ids repeat across pages.
pub fn item_key(item: &NewsItem, index: usize) -> String {
    format!("{}-{}", item.id, index)
}

const DATE_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Time label for the item at `index`.
///
/// The first thirty rows get a coarse label derived from their rank;
/// later rows show the upstream date.
pub fn relative_time_label(date: &str, index: usize) -> String {
    match index {
        0..=4 => "just now".to_string(),
        5..=14 => "1 hour ago".to_string(),
        15..=29 => "2 hours ago".to_string(),
        _ => format_date(date).unwrap_or_else(|| "today".to_string()),
    }
}

fn format_date(date: &str) -> Option<String> {
    let date = date.trim();
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        .map(|parsed| parsed.format("%Y-%m-%d %H:%M").to_string())
}
