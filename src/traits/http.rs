//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for HTTP operations, enabling
//! dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a 200 response carrying a JSON body.
    pub fn json_body(body: impl Into<String>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::with_headers(200, headers, Bytes::from(body.into()))
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client errors.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// The feed sources only ever issue GET requests against JSON endpoints,
/// so that is all the trait exposes. Implementations include the
/// reqwest-based client and [`MockHttpClient`](crate::adapters::MockHttpClient).
///
/// # Example
///
/// ```ignore
/// use hotnews::traits::{HttpClient, Headers, HttpError};
///
/// async fn fetch_json<C: HttpClient>(client: &C) -> Result<serde_json::Value, HttpError> {
///     let response = client.get("https://api.example.com/data", &Headers::new()).await?;
///     response.json().map_err(|e| HttpError::Other(e.to_string()))
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    ///
    /// Non-2xx statuses are returned as a [`Response`], not as an error;
    /// callers decide how to classify them.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        (**self).get(url, headers).await
    }
}

/// Append `params` to `base` as a URL-encoded query string.
///
/// Existing query strings on `base` are extended with `&`.
pub fn with_query(base: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, sep, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_new() {
        let response = Response::new(200, Bytes::from("Hello"));
        assert_eq!(response.status, 200);
        assert!(response.headers.is_empty());
        assert_eq!(response.body, Bytes::from("Hello"));
    }

    #[test]
    fn test_response_json_body_sets_content_type() {
        let response = Response::json_body("{}");
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("content-type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(300, Bytes::new()).is_success());
        assert!(!Response::new(404, Bytes::new()).is_success());
        assert!(!Response::new(500, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Envelope {
            error_code: i64,
        }

        let response = Response::new(200, Bytes::from(r#"{"error_code":0}"#));
        let data: Envelope = response.json().unwrap();
        assert_eq!(data, Envelope { error_code: 0 });
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::Timeout("10s".to_string()).to_string(),
            "Request timeout: 10s"
        );
        assert_eq!(
            HttpError::ServerError {
                status: 502,
                message: "Bad Gateway".to_string()
            }
            .to_string(),
            "Server error (502): Bad Gateway"
        );
        assert_eq!(
            HttpError::InvalidUrl("bad url".to_string()).to_string(),
            "Invalid URL: bad url"
        );
    }

    #[test]
    fn test_with_query_encodes_values() {
        let url = with_query(
            "https://api.example.com/news",
            &[("page", "2".to_string()), ("type", "top news".to_string())],
        );
        assert_eq!(url, "https://api.example.com/news?page=2&type=top%20news");
    }

    #[test]
    fn test_with_query_extends_existing_query() {
        let url = with_query("https://api.example.com/zb?type=jsonImg", &[("page", "1".to_string())]);
        assert_eq!(url, "https://api.example.com/zb?type=jsonImg&page=1");
    }

    #[test]
    fn test_with_query_empty_params() {
        assert_eq!(with_query("https://a.b/c", &[]), "https://a.b/c");
    }
}
