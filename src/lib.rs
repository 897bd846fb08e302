//! hotnews - a terminal reader for hot news feeds
//!
//! The feed core ([`feed`], [`busy`]) has no terminal dependency; the TUI
//! ([`app`], [`ui`], [`terminal`]) sits on top. This library exposes
//! modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod busy;
pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod feed;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod prelude;
pub mod terminal;
pub mod traits;
pub mod ui;
