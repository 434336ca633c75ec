//! Conversation service - the 1:1 conversation resolver
//!
//! Find-or-create over the unordered member pair. The store serializes the
//! check-and-insert, so concurrent attempts for the same pair always
//! converge on one conversation.

use tracing::{info, instrument};

use huddle_core::{Conversation, DomainError, Identity, RecordId};

use super::context::ServiceContext;
use super::member::MemberService;
use super::ServiceResult;

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the unique conversation between the caller and another
    /// member, creating it on first contact. Idempotent.
    ///
    /// The other member may be the caller themselves (notes-to-self).
    #[instrument(skip(self))]
    pub async fn resolve_or_create(
        &self,
        identity: Identity,
        workspace_id: RecordId,
        other_member_id: RecordId,
    ) -> ServiceResult<RecordId> {
        let member = MemberService::new(self.ctx)
            .resolve(identity, workspace_id)
            .await?;

        let other = self
            .ctx
            .member_repo()
            .find_by_id(other_member_id)
            .await?
            .filter(|other| other.workspace_id == workspace_id)
            .ok_or(DomainError::MemberNotFound)?;

        let conversation = self
            .ctx
            .conversation_repo()
            .find_or_create(workspace_id, member.id, other.id, self.ctx.generate_id())
            .await?;

        info!(conversation_id = %conversation.id, "conversation resolved");
        Ok(conversation.id)
    }

    /// Fetch a conversation the caller participates in, `None` otherwise
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        identity: Identity,
        conversation_id: RecordId,
    ) -> ServiceResult<Option<Conversation>> {
        let Some(conversation) = self
            .ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
        else {
            return Ok(None);
        };

        let Some(member) = MemberService::new(self.ctx)
            .current(identity, conversation.workspace_id)
            .await?
        else {
            return Ok(None);
        };
        if !conversation.involves(member.id) {
            return Ok(None);
        }
        Ok(Some(conversation))
    }
}
