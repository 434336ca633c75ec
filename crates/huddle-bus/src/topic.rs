//! Topic definitions - the scopes readers subscribe to

use huddle_core::{Destination, RecordId};

/// Topic prefix for workspace-wide events
pub const WORKSPACE_TOPIC_PREFIX: &str = "workspace:";
/// Topic prefix for channel-scoped events
pub const CHANNEL_TOPIC_PREFIX: &str = "channel:";
/// Topic prefix for conversation-scoped events
pub const CONVERSATION_TOPIC_PREFIX: &str = "conversation:";

/// A subscription scope on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Events for a whole workspace (membership, channel registry changes)
    Workspace(RecordId),
    /// Events for one channel's messages
    Channel(RecordId),
    /// Events for one conversation's messages
    Conversation(RecordId),
}

impl Topic {
    /// The topic a message destination publishes to
    pub fn for_destination(destination: Destination) -> Self {
        match destination {
            Destination::Channel(id) => Self::Channel(id),
            Destination::Conversation(id) => Self::Conversation(id),
        }
    }

    /// Stable topic name for logs
    pub fn name(&self) -> String {
        match self {
            Self::Workspace(id) => format!("{WORKSPACE_TOPIC_PREFIX}{id}"),
            Self::Channel(id) => format!("{CHANNEL_TOPIC_PREFIX}{id}"),
            Self::Conversation(id) => format!("{CONVERSATION_TOPIC_PREFIX}{id}"),
        }
    }
}
