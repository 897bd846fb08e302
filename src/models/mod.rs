//! Data models for the feeds.

pub mod digest;
pub mod news;

pub use digest::{DailyDigest, DigestEnvelope};
pub use news::{NewsEnvelope, NewsItem, NewsRecord};
