//! Message entity - a chat message in a channel, conversation, or thread
//!
//! Invariant: a message belongs to exactly one channel OR one conversation.
//! Thread replies additionally carry `parent_message_id`; a reply created
//! with neither destination inherits the conversation of its parent.

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Primary destination of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Channel(RecordId),
    Conversation(RecordId),
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: RecordId,
    pub workspace_id: RecordId,
    /// Authoring member (workspace-scoped identity, never a raw user id)
    pub member_id: RecordId,
    /// Opaque rich-text payload, stored byte-for-byte
    pub body: String,
    /// Opaque blob-store reference, stored verbatim
    pub image: Option<String>,
    pub channel_id: Option<RecordId>,
    pub conversation_id: Option<RecordId>,
    pub parent_message_id: Option<RecordId>,
    pub created_at: DateTime<Utc>,
    /// Absent until the first edit
    pub updated_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Create a channel message
    pub fn in_channel(
        id: RecordId,
        workspace_id: RecordId,
        member_id: RecordId,
        channel_id: RecordId,
        body: String,
    ) -> Self {
        Self {
            id,
            workspace_id,
            member_id,
            body,
            image: None,
            channel_id: Some(channel_id),
            conversation_id: None,
            parent_message_id: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Create a conversation message
    pub fn in_conversation(
        id: RecordId,
        workspace_id: RecordId,
        member_id: RecordId,
        conversation_id: RecordId,
        body: String,
    ) -> Self {
        Self {
            conversation_id: Some(conversation_id),
            channel_id: None,
            ..Self::in_channel(id, workspace_id, member_id, RecordId::default(), body)
        }
    }

    /// The primary destination, if the routing invariant holds
    pub fn destination(&self) -> Option<Destination> {
        match (self.channel_id, self.conversation_id) {
            (Some(channel_id), None) => Some(Destination::Channel(channel_id)),
            (None, Some(conversation_id)) => Some(Destination::Conversation(conversation_id)),
            _ => None,
        }
    }

    /// Check if this message is a thread reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_message_id.is_some()
    }

    /// Check if the message has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some()
    }

    /// Edit the message body, stamping `updated_at`
    pub fn edit(&mut self, body: String) {
        self.body = body;
        self.updated_at = Some(Utc::now());
    }
}
