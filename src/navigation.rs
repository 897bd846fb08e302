//! Opening a news item's detail page.

use std::sync::Mutex;

use crate::error::{AppError, AppResult};

/// Destination for "open detail" requests.
pub trait Navigator: Send + Sync {
    fn navigate_to_detail(&self, url: &str, title: &str) -> AppResult<()>;
}

/// Opens the article in the system browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate_to_detail(&self, url: &str, title: &str) -> AppResult<()> {
        if url.is_empty() {
            return Err(AppError::Navigation {
                url: String::new(),
                message: format!("\"{}\" has no link", title),
            });
        }
        tracing::info!(url, title, "opening detail");
        webbrowser::open(url).map_err(|e| AppError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Records requests instead of acting on them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<(String, String)>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(url, title)` pairs in request order.
    pub fn visits(&self) -> Vec<(String, String)> {
        self.visits.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to_detail(&self, url: &str, title: &str) -> AppResult<()> {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push((url.to_string(), title.to_string()));
        }
        Ok(())
    }
}
