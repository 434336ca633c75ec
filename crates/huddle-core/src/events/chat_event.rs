//! Domain events - emitted after every successful mutation
//!
//! The timeline engine (and any other live reader) subscribes to these
//! through the event bus; this is what makes reads change-driven instead
//! of polled.

use crate::entities::{Channel, Message};
use crate::value_objects::RecordId;

/// A change to data some reader may be observing
#[derive(Debug, Clone)]
pub enum ChatEvent {
    MessageCreated {
        message: Message,
    },
    MessageUpdated {
        message: Message,
    },
    MessageDeleted {
        workspace_id: RecordId,
        message_id: RecordId,
        channel_id: Option<RecordId>,
        conversation_id: Option<RecordId>,
        parent_message_id: Option<RecordId>,
    },
    ReactionToggled {
        workspace_id: RecordId,
        message_id: RecordId,
        member_id: RecordId,
        value: String,
        /// true if the toggle added the reaction, false if it removed it
        added: bool,
    },
    ChannelCreated {
        channel: Channel,
    },
    ChannelRenamed {
        channel: Channel,
    },
    ChannelDeleted {
        workspace_id: RecordId,
        channel_id: RecordId,
    },
}

impl ChatEvent {
    /// Stable event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::MessageCreated { .. } => "MESSAGE_CREATED",
            Self::MessageUpdated { .. } => "MESSAGE_UPDATED",
            Self::MessageDeleted { .. } => "MESSAGE_DELETED",
            Self::ReactionToggled { .. } => "REACTION_TOGGLED",
            Self::ChannelCreated { .. } => "CHANNEL_CREATED",
            Self::ChannelRenamed { .. } => "CHANNEL_RENAMED",
            Self::ChannelDeleted { .. } => "CHANNEL_DELETED",
        }
    }

    /// Workspace the event belongs to
    pub fn workspace_id(&self) -> RecordId {
        match self {
            Self::MessageCreated { message } | Self::MessageUpdated { message } => {
                message.workspace_id
            }
            Self::MessageDeleted { workspace_id, .. }
            | Self::ReactionToggled { workspace_id, .. }
            | Self::ChannelDeleted { workspace_id, .. } => *workspace_id,
            Self::ChannelCreated { channel } | Self::ChannelRenamed { channel } => {
                channel.workspace_id
            }
        }
    }
}
