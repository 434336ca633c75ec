//! # huddle-bus
//!
//! In-process change feed built on tokio broadcast channels, one lazily
//! created channel per [`Topic`]. Every successful mutation publishes a
//! [`ChatEvent`] to the topics it touches; live readers (the timeline
//! engine) subscribe and re-derive their view on each event.
//!
//! Single-process by design. A multi-replica deployment would swap this for
//! an external pub/sub with the same publish/subscribe surface.

mod topic;

pub use topic::{
    Topic, CHANNEL_TOPIC_PREFIX, CONVERSATION_TOPIC_PREFIX, WORKSPACE_TOPIC_PREFIX,
};

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::trace;

use huddle_core::ChatEvent;

const TOPIC_CAPACITY: usize = 256;

/// Receiving side of a topic subscription
pub type EventReceiver = broadcast::Receiver<ChatEvent>;

/// In-process event bus
///
/// Cloning is cheap; all clones share the same topics.
#[derive(Clone, Default)]
pub struct EventBus {
    topics: Arc<DashMap<Topic, broadcast::Sender<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn sender(&self, topic: Topic) -> broadcast::Sender<ChatEvent> {
        self.topics
            .entry(topic)
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .clone()
    }

    /// Publish an event to a topic.
    ///
    /// An event with no current subscribers is dropped; publishing never
    /// fails and never blocks.
    pub fn publish(&self, topic: Topic, event: ChatEvent) {
        trace!(topic = %topic.name(), event = event.name(), "publishing event");
        let _ = self.sender(topic).send(event);
    }

    /// Subscribe to a topic.
    ///
    /// A receiver that falls more than the channel capacity behind observes
    /// `RecvError::Lagged`; such a reader should refetch instead of
    /// replaying.
    pub fn subscribe(&self, topic: Topic) -> EventReceiver {
        self.sender(topic).subscribe()
    }

    /// Number of live subscribers on a topic (for tests and introspection)
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.topics
            .get(&topic)
            .map_or(0, |sender| sender.receiver_count())
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("topics", &self.topics.len())
            .finish()
    }
}
