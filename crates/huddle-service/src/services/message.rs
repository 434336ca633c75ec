//! Message service - append-only message creation with routing,
//! author-gated edit and cascading delete
//!
//! Routing order on create matters and is fixed:
//! 1. an explicit conversation id wins;
//! 2. a bare parent id (no channel, no conversation) inherits the parent's
//!    destination - this is the thread-reply path;
//! 3. otherwise the message goes to the given channel.

use tracing::{info, instrument};
use validator::Validate;

use huddle_bus::Topic;
use huddle_core::{
    ChatEvent, Destination, DomainError, Identity, Message, MessageQuery, MessageScope, RecordId,
};

use crate::dto::CreateMessageRequest;

use super::context::ServiceContext;
use super::member::MemberService;
use super::ServiceResult;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a message; returns the new message id
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        identity: Identity,
        request: CreateMessageRequest,
    ) -> ServiceResult<RecordId> {
        request
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        let member = MemberService::new(self.ctx)
            .resolve(identity, request.workspace_id)
            .await?;

        let mut channel_id = request.channel_id;
        let mut conversation_id = request.conversation_id;

        // Bare reply: inherit the parent's destination. Replies to a 1:1
        // conversation arrive this way because the client only knows the
        // parent message.
        if conversation_id.is_none() && channel_id.is_none() {
            if let Some(parent_id) = request.parent_message_id {
                let parent = self
                    .ctx
                    .message_repo()
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(DomainError::InvalidReference("parent message"))?;
                conversation_id = parent.conversation_id;
                if conversation_id.is_none() {
                    channel_id = parent.channel_id;
                }
            }
        }

        let message = Message {
            id: self.ctx.generate_id(),
            workspace_id: request.workspace_id,
            member_id: member.id,
            body: request.body,
            image: request.image,
            channel_id,
            conversation_id,
            parent_message_id: request.parent_message_id,
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        let message_id = message.id;
        self.ctx.message_repo().create(&message).await?;

        info!(message_id = %message_id, "message created");
        if let Some(destination) = message.destination() {
            self.ctx.bus().publish(
                Topic::for_destination(destination),
                ChatEvent::MessageCreated { message },
            );
        }
        Ok(message_id)
    }

    /// Edit a message's body; only the authoring member may do this
    #[instrument(skip(self, body))]
    pub async fn update(
        &self,
        identity: Identity,
        message_id: RecordId,
        body: String,
    ) -> ServiceResult<()> {
        let mut message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        let member = MemberService::new(self.ctx)
            .resolve(identity, message.workspace_id)
            .await?;
        if message.member_id != member.id {
            return Err(DomainError::Forbidden);
        }

        message.edit(body);
        self.ctx.message_repo().update(&message).await?;

        info!(message_id = %message_id, "message updated");
        if let Some(destination) = message.destination() {
            self.ctx.bus().publish(
                Topic::for_destination(destination),
                ChatEvent::MessageUpdated { message },
            );
        }
        Ok(())
    }

    /// Delete a message, its thread replies, and all their reactions;
    /// only the authoring member may do this
    #[instrument(skip(self))]
    pub async fn delete(&self, identity: Identity, message_id: RecordId) -> ServiceResult<()> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        let member = MemberService::new(self.ctx)
            .resolve(identity, message.workspace_id)
            .await?;
        if message.member_id != member.id {
            return Err(DomainError::Forbidden);
        }

        let replies = self.ctx.message_repo().find_replies(message_id).await?;
        for reply in &replies {
            self.ctx.reaction_repo().delete_by_message(reply.id).await?;
            self.ctx.message_repo().delete(reply.id).await?;
            self.publish_deleted(reply);
        }
        self.ctx.reaction_repo().delete_by_message(message_id).await?;
        self.ctx.message_repo().delete(message_id).await?;
        self.publish_deleted(&message);

        info!(
            message_id = %message_id,
            cascaded_replies = replies.len(),
            "message deleted"
        );
        Ok(())
    }

    /// One page of a scope, newest-first.
    ///
    /// Visibility follows the scope: channel pages need workspace
    /// membership, conversation pages need participation. Outsiders get an
    /// empty page, never an error. Cursor management on top of this lives
    /// in the timeline engine.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        identity: Identity,
        scope: MessageScope,
        query: MessageQuery,
    ) -> ServiceResult<Vec<Message>> {
        if !self.can_view(identity, scope).await? {
            return Ok(Vec::new());
        }
        self.ctx.message_repo().find_page(scope, query).await
    }

    async fn can_view(&self, identity: Identity, scope: MessageScope) -> ServiceResult<bool> {
        match scope.destination {
            Destination::Channel(channel_id) => {
                let Some(channel) = self.ctx.channel_repo().find_by_id(channel_id).await? else {
                    return Ok(false);
                };
                Ok(MemberService::new(self.ctx)
                    .current(identity, channel.workspace_id)
                    .await?
                    .is_some())
            }
            Destination::Conversation(conversation_id) => {
                let Some(conversation) = self
                    .ctx
                    .conversation_repo()
                    .find_by_id(conversation_id)
                    .await?
                else {
                    return Ok(false);
                };
                let Some(member) = MemberService::new(self.ctx)
                    .current(identity, conversation.workspace_id)
                    .await?
                else {
                    return Ok(false);
                };
                Ok(conversation.involves(member.id))
            }
        }
    }

    /// Fetch a message; callers outside its workspace get `None`
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        identity: Identity,
        message_id: RecordId,
    ) -> ServiceResult<Option<Message>> {
        let Some(message) = self.ctx.message_repo().find_by_id(message_id).await? else {
            return Ok(None);
        };
        if MemberService::new(self.ctx)
            .current(identity, message.workspace_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }
        Ok(Some(message))
    }

    fn publish_deleted(&self, message: &Message) {
        if let Some(destination) = message.destination() {
            self.ctx.bus().publish(
                Topic::for_destination(destination),
                ChatEvent::MessageDeleted {
                    workspace_id: message.workspace_id,
                    message_id: message.id,
                    channel_id: message.channel_id,
                    conversation_id: message.conversation_id,
                    parent_message_id: message.parent_message_id,
                },
            );
        }
    }
}
