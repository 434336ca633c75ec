//! Live message feed - paginated history plus change-driven updates
//!
//! A feed owns one scope's loaded window: the newest page first, older
//! pages appended on demand. Between loads it drains its topic
//! subscription, so creations land at the newest edge, edits patch in
//! place, and deletions drop out, all without touching the pages already
//! loaded.

use std::sync::Arc;

use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, warn};

use huddle_bus::{EventBus, EventReceiver, Topic};
use huddle_core::{
    ChatEvent, Destination, Message, MessageRepository, MessageScope, RecordId, RepoResult,
};

use crate::pagination::{Cursor, MessagePager};

/// Loading state of a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Nothing loaded yet
    LoadingFirstPage,
    /// At least one page loaded, older history may exist
    CanLoadMore,
    /// An older page is being fetched
    LoadingMore,
    /// All history for the scope is loaded
    Exhausted,
}

/// Live view over one message scope
pub struct MessageFeed {
    pager: MessagePager,
    scope: MessageScope,
    receiver: EventReceiver,
    messages: Vec<Message>,
    cursor: Option<Cursor>,
    status: FeedStatus,
}

impl MessageFeed {
    /// Open a feed over `scope`, subscribing to its topic before any load
    /// so no event can slip between first page and first sync.
    pub fn open(
        repo: Arc<dyn MessageRepository>,
        bus: &EventBus,
        scope: MessageScope,
        page_size: usize,
    ) -> Self {
        let receiver = bus.subscribe(Topic::for_destination(scope.destination));
        Self {
            pager: MessagePager::new(repo, scope, page_size),
            scope,
            receiver,
            messages: Vec::new(),
            cursor: None,
            status: FeedStatus::LoadingFirstPage,
        }
    }

    /// Current loading state
    pub fn status(&self) -> FeedStatus {
        self.status
    }

    /// The loaded window, newest-first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Load the newest page. Only meaningful in `LoadingFirstPage`; later
    /// calls are no-ops.
    pub async fn load_first_page(&mut self) -> RepoResult<()> {
        if self.status != FeedStatus::LoadingFirstPage {
            return Ok(());
        }
        let page = self.pager.fetch(None).await?;
        self.messages = page.messages;
        self.cursor = page.next;
        self.status = if self.cursor.is_some() {
            FeedStatus::CanLoadMore
        } else {
            FeedStatus::Exhausted
        };
        Ok(())
    }

    /// Load the next older page. A no-op unless the feed is in
    /// `CanLoadMore`; the page is appended whole once fetched.
    pub async fn load_more(&mut self) -> RepoResult<()> {
        if self.status != FeedStatus::CanLoadMore {
            return Ok(());
        }
        self.status = FeedStatus::LoadingMore;
        let page = match self.pager.fetch(self.cursor).await {
            Ok(page) => page,
            Err(e) => {
                self.status = FeedStatus::CanLoadMore;
                return Err(e);
            }
        };
        self.messages.extend(page.messages);
        self.cursor = page.next;
        self.status = if self.cursor.is_some() {
            FeedStatus::CanLoadMore
        } else {
            FeedStatus::Exhausted
        };
        Ok(())
    }

    /// Drain pending events from the bus into the loaded window.
    ///
    /// Returns the number of events applied. A lagged subscription is
    /// logged and skipped over; callers wanting exact state after a lag
    /// should rebuild the feed.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.apply(&event);
                    applied += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "feed subscription lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        applied
    }

    fn apply(&mut self, event: &ChatEvent) {
        match event {
            ChatEvent::MessageCreated { message } => {
                if self.scope.matches(message) && !self.contains(message.id) {
                    debug!(message_id = %message.id, "feed prepend");
                    self.messages.insert(0, message.clone());
                }
            }
            ChatEvent::MessageUpdated { message } => {
                if let Some(slot) = self.messages.iter_mut().find(|m| m.id == message.id) {
                    *slot = message.clone();
                }
            }
            ChatEvent::MessageDeleted { message_id, .. } => {
                self.messages.retain(|m| m.id != *message_id);
            }
            // The scope itself is gone; its cascaded messages go with it.
            ChatEvent::ChannelDeleted { channel_id, .. } => {
                if self.scope.destination == Destination::Channel(*channel_id) {
                    debug!(channel_id = %channel_id, "feed scope deleted");
                    self.messages.clear();
                    self.cursor = None;
                    self.status = FeedStatus::Exhausted;
                }
            }
            // Reactions and channel create/rename do not change the message
            // window; readers fetch reactions separately.
            _ => {}
        }
    }

    fn contains(&self, id: RecordId) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }
}
