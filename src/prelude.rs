//! Prelude module for convenient imports.
//!
//! ```ignore
//! use hotnews::prelude::*;
//! ```

// Feed core
pub use crate::feed::{
    FeedController, FetchGate, FetchMode, FetchOutcome, FetchSettlement, PageCursor, PageSource,
    PaginationState, PendingFetch, RefreshMachine, RefreshPhase, ScrollMetrics,
};

// Busy indicator
pub use crate::busy::{busy_channel, BusyCommand, BusyHandle, BusyIndicator};

// Models and errors
pub use crate::error::{AppError, AppResult, FeedError};
pub use crate::models::{DailyDigest, NewsItem};

// Wiring
pub use crate::config::FeedConfig;
pub use crate::navigation::Navigator;
pub use crate::traits::HttpClient;

// Application
pub use crate::app::{App, AppMessage, Tab};
