//! # huddle-timeline
//!
//! Read-side engine for message timelines: cursor pagination over a scope,
//! a live feed that folds bus events into the loaded window, and the day
//! bucketing with compact-run detection that clients render from.
//!
//! Everything here is derived state; the store stays the single source of
//! truth and a feed can always be rebuilt from it.

pub mod feed;
pub mod grouping;
pub mod pagination;

pub use feed::{FeedStatus, MessageFeed};
pub use grouping::{group_into_days, DaySection, TimelineEntry, COMPACT_WINDOW_MINUTES};
pub use pagination::{Cursor, MessagePage, MessagePager, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
