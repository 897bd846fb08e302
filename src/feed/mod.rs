//! Paginated news feed with pull-to-refresh.
//!
//! Independent of the terminal: everything here can be driven from tests
//! or a different front end.
//!
//! - [`source`]: where pages come from ([`PageSource`], [`HotNewsSource`])
//! - [`gate`]: single-flight fetch dispatch ([`FetchGate`])
//! - [`pagination`]: the reducer over fetch outcomes ([`PaginationState`])
//! - [`refresh`]: the pull gesture state machine ([`RefreshMachine`])
//! - [`animation`]: header easing ([`HeaderAnimator`])
//! - [`surface`]: footer, near-end and label rules
//! - [`controller`]: all of the above for one list ([`FeedController`])

pub mod animation;
pub mod controller;
pub mod gate;
pub mod pagination;
pub mod refresh;
pub mod source;
pub mod surface;

pub use animation::HeaderAnimator;
pub use controller::FeedController;
pub use gate::{FetchGate, FetchMode, FetchOutcome, FetchSettlement, InFlightGuard, PendingFetch};
pub use pagination::PaginationState;
pub use refresh::{
    transition, GestureEvent, HeaderTarget, RefreshConfig, RefreshEffect, RefreshMachine,
    RefreshPhase, Step, Transition,
};
pub use source::{HotNewsSource, PageCursor, PageResult, PageSource};
pub use surface::{
    footer_state, item_key, relative_time_label, should_load_more, FooterState, ScrollMetrics,
};
