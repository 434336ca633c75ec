//! Request DTOs with boundary validation

use validator::{Validate, ValidationError};

use huddle_core::RecordId;

/// Request to create a workspace
#[derive(Debug, Clone, Validate)]
pub struct CreateWorkspaceRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
}

/// Request to create a channel
#[derive(Debug, Clone, Validate)]
pub struct CreateChannelRequest {
    pub workspace_id: RecordId,
    #[validate(length(min = 1, max = 80))]
    pub name: String,
}

/// Request to create a message
///
/// Destination combinations are checked at the boundary: naming both a
/// channel and a conversation is invalid, as is naming neither while also
/// not replying to a parent message.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = validate_routing))]
pub struct CreateMessageRequest {
    pub workspace_id: RecordId,
    /// Opaque rich-text payload
    #[validate(length(min = 1))]
    pub body: String,
    /// Opaque blob-store reference
    pub image: Option<String>,
    pub channel_id: Option<RecordId>,
    pub parent_message_id: Option<RecordId>,
    pub conversation_id: Option<RecordId>,
}

impl CreateMessageRequest {
    /// A plain channel message
    pub fn channel(workspace_id: RecordId, channel_id: RecordId, body: impl Into<String>) -> Self {
        Self {
            workspace_id,
            body: body.into(),
            image: None,
            channel_id: Some(channel_id),
            parent_message_id: None,
            conversation_id: None,
        }
    }

    /// A plain conversation message
    pub fn conversation(
        workspace_id: RecordId,
        conversation_id: RecordId,
        body: impl Into<String>,
    ) -> Self {
        Self {
            workspace_id,
            body: body.into(),
            image: None,
            channel_id: None,
            parent_message_id: None,
            conversation_id: Some(conversation_id),
        }
    }

    /// A thread reply with no explicit destination; the destination is
    /// inherited from the parent at routing time
    pub fn reply(
        workspace_id: RecordId,
        parent_message_id: RecordId,
        body: impl Into<String>,
    ) -> Self {
        Self {
            workspace_id,
            body: body.into(),
            image: None,
            channel_id: None,
            parent_message_id: Some(parent_message_id),
            conversation_id: None,
        }
    }

    /// Attach an image reference
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Mark as a reply to a parent message
    pub fn in_thread(mut self, parent_message_id: RecordId) -> Self {
        self.parent_message_id = Some(parent_message_id);
        self
    }
}

fn validate_routing(request: &CreateMessageRequest) -> Result<(), ValidationError> {
    if request.channel_id.is_some() && request.conversation_id.is_some() {
        return Err(ValidationError::new("message_both_destinations"));
    }
    if request.channel_id.is_none()
        && request.conversation_id.is_none()
        && request.parent_message_id.is_none()
    {
        return Err(ValidationError::new("message_no_destination"));
    }
    Ok(())
}
