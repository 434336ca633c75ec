//! Channel service - the channel registry
//!
//! Create, rename, and delete are admin-gated. Deletion cascades through
//! every message in the channel (thread replies included) and their
//! reactions; nothing is left dangling.

use tracing::{info, instrument};
use validator::Validate;

use huddle_bus::Topic;
use huddle_core::{normalize_channel_name, Channel, ChatEvent, DomainError, Identity, RecordId};

use crate::dto::CreateChannelRequest;

use super::context::ServiceContext;
use super::member::MemberService;
use super::ServiceResult;

// Hyphen-only or whitespace-only raw names normalize to "", which the
// raw-string length check cannot catch.
fn require_usable_name(raw_name: &str) -> ServiceResult<()> {
    if normalize_channel_name(raw_name).is_empty() {
        return Err(DomainError::Validation(
            "channel name must contain at least one usable character".to_string(),
        ));
    }
    Ok(())
}

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a channel (admin only); the raw name is normalized
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        identity: Identity,
        request: CreateChannelRequest,
    ) -> ServiceResult<RecordId> {
        request
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;
        require_usable_name(&request.name)?;
        MemberService::new(self.ctx)
            .require_admin(identity, request.workspace_id)
            .await?;

        let channel = Channel::new(
            self.ctx.generate_id(),
            request.workspace_id,
            &request.name,
        );
        let channel_id = channel.id;
        self.ctx.channel_repo().create(&channel).await?;

        info!(channel_id = %channel_id, name = %channel.name, "channel created");
        self.ctx.bus().publish(
            Topic::Workspace(request.workspace_id),
            ChatEvent::ChannelCreated { channel },
        );
        Ok(channel_id)
    }

    /// Rename a channel (admin of its workspace only)
    #[instrument(skip(self))]
    pub async fn rename(
        &self,
        identity: Identity,
        channel_id: RecordId,
        raw_name: &str,
    ) -> ServiceResult<()> {
        require_usable_name(raw_name)?;
        let mut channel = self
            .ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        MemberService::new(self.ctx)
            .require_admin(identity, channel.workspace_id)
            .await?;

        channel.rename(raw_name);
        self.ctx.channel_repo().update(&channel).await?;

        info!(channel_id = %channel_id, name = %channel.name, "channel renamed");
        self.ctx.bus().publish(
            Topic::Workspace(channel.workspace_id),
            ChatEvent::ChannelRenamed { channel },
        );
        Ok(())
    }

    /// Delete a channel and everything under it (admin only)
    #[instrument(skip(self))]
    pub async fn delete(&self, identity: Identity, channel_id: RecordId) -> ServiceResult<()> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        MemberService::new(self.ctx)
            .require_admin(identity, channel.workspace_id)
            .await?;

        // Cascade before the channel row goes away. Thread replies carry
        // the channel id too, so one sweep covers them.
        let messages = self.ctx.message_repo().find_all_in_channel(channel_id).await?;
        for message in &messages {
            self.ctx.reaction_repo().delete_by_message(message.id).await?;
            self.ctx.message_repo().delete(message.id).await?;
        }
        self.ctx.channel_repo().delete(channel_id).await?;

        info!(
            channel_id = %channel_id,
            cascaded_messages = messages.len(),
            "channel deleted"
        );
        // Both topics: workspace subscribers see the registry change, live
        // feeds over the channel itself see their scope disappear.
        let event = ChatEvent::ChannelDeleted {
            workspace_id: channel.workspace_id,
            channel_id,
        };
        self.ctx
            .bus()
            .publish(Topic::Workspace(channel.workspace_id), event.clone());
        self.ctx.bus().publish(Topic::Channel(channel_id), event);
        Ok(())
    }

    /// List a workspace's channels; outsiders get an empty sequence,
    /// never an error
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        identity: Identity,
        workspace_id: RecordId,
    ) -> ServiceResult<Vec<Channel>> {
        if MemberService::new(self.ctx)
            .current(identity, workspace_id)
            .await?
            .is_none()
        {
            return Ok(Vec::new());
        }
        self.ctx.channel_repo().find_by_workspace(workspace_id).await
    }

    /// Fetch a channel; callers outside its workspace get `None`, the same
    /// answer as for a channel that does not exist
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        identity: Identity,
        channel_id: RecordId,
    ) -> ServiceResult<Option<Channel>> {
        let Some(channel) = self.ctx.channel_repo().find_by_id(channel_id).await? else {
            return Ok(None);
        };
        if MemberService::new(self.ctx)
            .current(identity, channel.workspace_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }
        Ok(Some(channel))
    }
}
