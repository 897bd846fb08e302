//! Error handling for hotnews.
//!
//! - [`FeedError`]: what a page fetch can fail with. Shown inline, never fatal.
//! - [`AppError`]: startup and CLI failures at the binary boundary.
//!
//! | Kind | Code | Retryable |
//! |------|------|-----------|
//! | TransportTimeout | `E_FEED_TIMEOUT` | Yes |
//! | TransportFailure | `E_FEED_TRANSPORT` | Yes |
//! | Application | `E_FEED_APP` | No |
//! | MalformedResponse | `E_FEED_MALFORMED` | No |

mod app;
mod feed;

pub use app::{AppError, AppResult};
pub use feed::{classify_http_error, FeedError, GENERIC_FETCH_FAILURE};
