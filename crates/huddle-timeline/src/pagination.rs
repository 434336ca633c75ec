//! Cursor pagination over a message scope
//!
//! Pages walk backwards through time: the first page holds the newest
//! messages, each cursor points past the oldest message already seen.
//! Cursors are exclusive, so a message is never delivered twice.

use std::sync::Arc;

use huddle_core::{Message, MessageQuery, MessageRepository, MessageScope, RecordId, RepoResult};

/// Default number of messages per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Hard cap on page size, whatever the configuration says
pub const MAX_PAGE_SIZE: usize = 100;

/// Continuation token for the next (older) page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    before: RecordId,
}

impl Cursor {
    /// Cursor pointing at messages strictly older than `before`
    pub fn before(before: RecordId) -> Self {
        Self { before }
    }
}

/// One page of messages, newest-first
#[derive(Debug, Clone)]
pub struct MessagePage {
    pub messages: Vec<Message>,
    /// Cursor for the next page; `None` once the scope is exhausted
    pub next: Option<Cursor>,
}

impl MessagePage {
    /// Whether an older page may still exist
    #[inline]
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Fetches fixed-size pages of one scope
pub struct MessagePager {
    repo: Arc<dyn MessageRepository>,
    scope: MessageScope,
    page_size: usize,
}

impl MessagePager {
    /// Create a pager over `scope` with the given page size, clamped to
    /// `1..=MAX_PAGE_SIZE`
    pub fn new(repo: Arc<dyn MessageRepository>, scope: MessageScope, page_size: usize) -> Self {
        Self {
            repo,
            scope,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The scope this pager walks
    pub fn scope(&self) -> MessageScope {
        self.scope
    }

    /// Fetch one page; `None` cursor means the first (newest) page.
    ///
    /// A short page marks the scope exhausted, so `next` is only set when
    /// the page came back full.
    pub async fn fetch(&self, cursor: Option<Cursor>) -> RepoResult<MessagePage> {
        let query = MessageQuery {
            before: cursor.map(|c| c.before),
            limit: self.page_size,
        };
        let messages = self.repo.find_page(self.scope, query).await?;

        let next = if messages.len() == self.page_size {
            messages.last().map(|oldest| Cursor::before(oldest.id))
        } else {
            None
        };
        Ok(MessagePage { messages, next })
    }
}
