//! Mock implementations for test fixtures.
//!
//! Re-exports the mocks from `hotnews::adapters::mock` and adds builders
//! for upstream JSON bodies.

pub use hotnews::adapters::mock::{news_batch, MockHttpClient, MockPageSource, MockResponse};
pub use hotnews::traits::{Headers, HttpClient, HttpError, Response};

use bytes::Bytes;
use serde_json::json;

/// A hot-news envelope carrying `n` records with ids `{prefix}{i}`.
pub fn page_json(prefix: &str, n: usize) -> String {
    let data: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "uniquekey": format!("{}{}", prefix, i),
                "title": format!("{} headline {}", prefix, i),
                "category": "top",
                "date": "2024-03-05 08:07:09",
                "author_name": "Wire",
                "url": format!("https://news.test/{}{}", prefix, i),
                "thumbnail_pic_s": "",
            })
        })
        .collect();
    json!({
        "error_code": 0,
        "reason": "success",
        "result": { "data": data }
    })
    .to_string()
}

/// A hot-news envelope reporting an application error.
pub fn error_json(code: i64, reason: &str) -> String {
    json!({ "error_code": code, "reason": reason, "result": null }).to_string()
}

/// Builder for a [`MockHttpClient`] answering page requests in order.
pub struct MockFeedHttp {
    client: MockHttpClient,
}

impl MockFeedHttp {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Queue a page of `n` records.
    pub fn page(self, prefix: &str, n: usize) -> Self {
        self.client
            .push_response(MockResponse::Success(Response::json_body(page_json(prefix, n))));
        self
    }

    /// Queue an application error.
    pub fn app_error(self, reason: &str) -> Self {
        self.client
            .push_response(MockResponse::Success(Response::json_body(error_json(10001, reason))));
        self
    }

    /// Queue a bare HTTP status.
    pub fn status(self, status: u16) -> Self {
        self.client
            .push_response(MockResponse::Success(Response::new(status, Bytes::new())));
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockFeedHttp {
    fn default() -> Self {
        Self::new()
    }
}
