//! Paginated upstream data source.

use async_trait::async_trait;
use std::fmt;

use crate::config::FeedConfig;
use crate::error::{classify_http_error, FeedError};
use crate::models::{NewsEnvelope, NewsItem};
use crate::traits::{with_query, Headers, HttpClient};

/// 1-based page number of the next page to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageCursor(u32);

impl PageCursor {
    /// Page requested by a refresh.
    pub const FIRST: PageCursor = PageCursor(1);
    /// Cursor after a refresh consumed page 1.
    pub const AFTER_REFRESH: PageCursor = PageCursor(2);

    /// Cursor for `page`; zero is treated as the first page.
    pub fn new(page: u32) -> Self {
        Self(page.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of one page request.
///
/// `Ok(None)` means the endpoint reported success but sent no result
/// section; there is nothing to apply, not even an empty page.
pub type PageResult = Result<Option<Vec<NewsItem>>, FeedError>;

/// Anything that can hand back one page of news.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: PageCursor) -> PageResult;
}

/// The hot-news JSON endpoint.
///
/// Requests look like
/// `GET {endpoint}?key=…&type=&page=N&page_size=10&is_filter=1`.
#[derive(Debug, Clone)]
pub struct HotNewsSource<C: HttpClient> {
    client: C,
    endpoint: String,
    api_key: String,
    page_size: u32,
    timeout_secs: u64,
}

impl<C: HttpClient> HotNewsSource<C> {
    pub fn new(client: C, config: &FeedConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
            timeout_secs: config.request_timeout.as_secs(),
        }
    }

    /// Full request URL for `page`.
    pub fn page_url(&self, page: PageCursor) -> String {
        with_query(
            &self.endpoint,
            &[
                ("key", self.api_key.clone()),
                ("type", String::new()),
                ("page", page.get().to_string()),
                ("page_size", self.page_size.to_string()),
                ("is_filter", "1".to_string()),
            ],
        )
    }
}

#[async_trait]
impl<C: HttpClient> PageSource for HotNewsSource<C> {
    async fn fetch_page(&self, page: PageCursor) -> PageResult {
        let url = self.page_url(page);
        let response = self
            .client
            .get(&url, &Headers::new())
            .await
            .map_err(|e| classify_http_error(e, self.timeout_secs))?;

        if !response.is_success() {
            return Err(FeedError::TransportFailure {
                message: format!("HTTP {}", response.status),
            });
        }

        let envelope: NewsEnvelope = response.json()?;
        if !envelope.is_success() {
            tracing::warn!(
                page = page.get(),
                code = envelope.error_code,
                reason = %envelope.reason,
                "hot news endpoint reported an error"
            );
            return Err(FeedError::application(envelope.reason));
        }

        let items = envelope.into_page();
        if items.is_none() {
            tracing::warn!(page = page.get(), "hot news endpoint sent no result section");
        }
        Ok(items)
    }
}
