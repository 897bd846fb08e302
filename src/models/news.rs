//! News item and the upstream list envelope.

use serde::{Deserialize, Deserializer, Serialize};

/// Upstream `error_code` meaning success.
pub const SUCCESS_CODE: i64 = 0;

/// Treat an explicit JSON `null` like a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw news record as sent by the hot-news endpoint.
///
/// The upstream is loose about types: any string field may be absent or
/// `null`, and both read as empty.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct NewsRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uniquekey: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub thumbnail_pic_s: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

/// `result` section of the list envelope.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct NewsResult {
    #[serde(default)]
    pub data: Option<Vec<NewsRecord>>,
}

/// Envelope returned by the hot-news endpoint.
///
/// ```json
/// { "error_code": 0, "reason": "success", "result": { "data": [ ... ] } }
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewsEnvelope {
    pub error_code: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reason: String,
    #[serde(default)]
    pub result: Option<NewsResult>,
}

impl NewsEnvelope {
    /// Whether the endpoint reported success.
    pub fn is_success(&self) -> bool {
        self.error_code == SUCCESS_CODE
    }

    /// Items carried by a successful envelope.
    ///
    /// `None` when there is no `result` section at all; a `result` without
    /// a data list is an empty page.
    pub fn into_page(self) -> Option<Vec<NewsItem>> {
        let result = self.result?;
        Some(
            result
                .data
                .unwrap_or_default()
                .into_iter()
                .map(NewsItem::from)
                .collect(),
        )
    }
}

/// A single entry in the hot news list.
///
/// Identifiers are NOT unique across pages; use [`item_key`](crate::feed::item_key)
/// to derive a render key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Upstream identifier (`uniquekey`)
    pub id: String,
    pub title: String,
    pub category: String,
    /// Thumbnail URL; `None` when the upstream sent an empty string
    pub thumbnail: Option<String>,
    /// Source label (`author_name`)
    pub author: String,
    /// Raw upstream date string
    pub date: String,
    /// Detail page URL
    pub url: String,
}

impl NewsItem {
    /// Convenience constructor, mostly for tests and fixtures.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: String::new(),
            thumbnail: None,
            author: String::new(),
            date: String::new(),
            url: String::new(),
        }
    }

    /// Set the detail URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the source label.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the raw date string.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

impl From<NewsRecord> for NewsItem {
    fn from(record: NewsRecord) -> Self {
        let thumbnail = Some(record.thumbnail_pic_s).filter(|t| !t.trim().is_empty());
        Self {
            id: record.uniquekey,
            title: record.title,
            category: record.category,
            thumbnail,
            author: record.author_name,
            date: record.date,
            url: record.url,
        }
    }
}
