//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP GET against the feed endpoints

pub mod http;

pub use http::{with_query, Headers, HttpClient, HttpError, Response};
