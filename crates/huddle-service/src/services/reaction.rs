//! Reaction service - the reaction aggregator
//!
//! Reacting is a toggle, not an upsert: each call flips exactly one
//! (message, member, value) state. The flip itself is atomic inside the
//! store.

use tracing::{info, instrument};

use huddle_bus::Topic;
use huddle_core::{
    aggregate_reactions, ChatEvent, DomainError, Identity, Reaction, ReactionGroup, RecordId,
};

use super::context::ServiceContext;
use super::member::MemberService;
use super::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the caller's reaction on a message.
    ///
    /// Returns `true` if the reaction is now present, `false` if the call
    /// removed it.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        identity: Identity,
        message_id: RecordId,
        value: impl Into<String> + std::fmt::Debug,
    ) -> ServiceResult<bool> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        let member = MemberService::new(self.ctx)
            .resolve(identity, message.workspace_id)
            .await?;

        let value = value.into();
        let reaction = Reaction::new(
            self.ctx.generate_id(),
            message.workspace_id,
            message_id,
            member.id,
            value.clone(),
        );
        let added = self.ctx.reaction_repo().toggle(reaction).await?;

        info!(message_id = %message_id, value = %value, added, "reaction toggled");
        if let Some(destination) = message.destination() {
            self.ctx.bus().publish(
                Topic::for_destination(destination),
                ChatEvent::ReactionToggled {
                    workspace_id: message.workspace_id,
                    message_id,
                    member_id: member.id,
                    value,
                    added,
                },
            );
        }
        Ok(added)
    }

    /// Aggregated reactions on a message, grouped by value in first-seen
    /// order; outsiders get an empty sequence
    #[instrument(skip(self))]
    pub async fn list_for_message(
        &self,
        identity: Identity,
        message_id: RecordId,
    ) -> ServiceResult<Vec<ReactionGroup>> {
        let Some(message) = self.ctx.message_repo().find_by_id(message_id).await? else {
            return Ok(Vec::new());
        };
        if MemberService::new(self.ctx)
            .current(identity, message.workspace_id)
            .await?
            .is_none()
        {
            return Ok(Vec::new());
        }

        let reactions = self.ctx.reaction_repo().find_by_message(message_id).await?;
        Ok(aggregate_reactions(&reactions))
    }
}
