//! Messages sent back to the UI loop by spawned tasks.

use crate::error::FeedError;
use crate::feed::FetchSettlement;
use crate::models::DailyDigest;

/// Results of async work, consumed by [`App::handle_message`](super::App::handle_message).
#[derive(Debug)]
pub enum AppMessage {
    /// A feed page fetch finished. The gate stays closed until this is handled.
    FeedSettled(FetchSettlement),
    /// The daily digest fetch finished.
    DigestLoaded(Result<DailyDigest, FeedError>),
}
