//! In-memory page source for testing the feed without HTTP.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::FeedError;
use crate::feed::{PageCursor, PageResult, PageSource};
use crate::models::NewsItem;

/// Page source that answers from a script and records every call.
///
/// Results are consumed in push order; once the script runs out every
/// page comes back empty.
#[derive(Debug, Clone, Default)]
pub struct MockPageSource {
    script: Arc<Mutex<VecDeque<PageResult>>>,
    calls: Arc<Mutex<Vec<PageCursor>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl MockPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page of `items`.
    pub fn push_page(&self, items: Vec<NewsItem>) -> &Self {
        self.script.lock().unwrap().push_back(Ok(Some(items)));
        self
    }

    /// Queue a success that carries no result section.
    pub fn push_unchanged(&self) -> &Self {
        self.script.lock().unwrap().push_back(Ok(None));
        self
    }

    /// Queue a failure.
    pub fn push_error(&self, error: FeedError) -> &Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Delay every answer by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Pages requested so far, in order.
    pub fn calls(&self) -> Vec<PageCursor> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn fetch_page(&self, page: PageCursor) -> PageResult {
        self.calls.lock().unwrap().push(page);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Some(Vec::new())))
    }
}

/// `n` items with ids `{prefix}{i}`.
pub fn news_batch(prefix: &str, n: usize) -> Vec<NewsItem> {
    (0..n)
        .map(|i| {
            NewsItem::new(format!("{}{}", prefix, i), format!("{} headline {}", prefix, i))
                .with_url(format!("https://news.test/{}{}", prefix, i))
        })
        .collect()
}
