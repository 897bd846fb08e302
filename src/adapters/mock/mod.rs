//! Mock implementations for testing.
//!
//! Enables unit testing of feed sources and the fetch gate without
//! network access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockPageSource`] - scripted pages for the fetch gate and controller

pub mod http;
pub mod source;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use source::{news_batch, MockPageSource};
