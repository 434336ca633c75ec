//! Test fixtures and seeded environments

use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::Result;

use huddle_bus::EventBus;
use huddle_common::try_init_tracing;
use huddle_core::{Identity, Member, RecordId};
use huddle_service::{
    ChannelService, CreateChannelRequest, CreateWorkspaceRequest, MemberService, ServiceContext,
    WorkspaceService,
};
use huddle_store::MemoryStore;

/// Counter for unique test user ids
static USER_COUNTER: AtomicI64 = AtomicI64::new(1);

/// A fresh authenticated identity, unique within the test binary
pub fn unique_user() -> Identity {
    Identity::user(RecordId::new(USER_COUNTER.fetch_add(1, Ordering::SeqCst)))
}

/// Fully wired in-process stack
pub struct TestEnv {
    pub store: MemoryStore,
    pub bus: EventBus,
    pub ctx: ServiceContext,
}

impl TestEnv {
    /// Wire store, bus, and service context together
    pub fn new() -> Result<Self> {
        // First fixture in the binary installs the subscriber, the rest
        // see AlreadyInitialized.
        let _ = try_init_tracing();
        let store = MemoryStore::new();
        let bus = EventBus::new();
        let ctx = ServiceContext::builder()
            .workspace_repo(store.workspaces())
            .member_repo(store.members())
            .channel_repo(store.channels())
            .conversation_repo(store.conversations())
            .message_repo(store.messages())
            .reaction_repo(store.reactions())
            .bus(bus.clone())
            .build()?;
        Ok(Self { store, bus, ctx })
    }

    /// Create a workspace with an admin and one plain member
    pub async fn seed_workspace(&self) -> Result<SeededWorkspace> {
        let admin = unique_user();
        let workspace_id = WorkspaceService::new(&self.ctx)
            .create(
                admin,
                CreateWorkspaceRequest {
                    name: "Acme".to_string(),
                },
            )
            .await?;
        let admin_member = MemberService::new(&self.ctx)
            .current(admin, workspace_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("creator must be a member"))?;

        let member = unique_user();
        let member_id = self.join_workspace(workspace_id, member).await?;

        Ok(SeededWorkspace {
            workspace_id,
            admin,
            admin_member_id: admin_member.id,
            member,
            member_id,
        })
    }

    /// Add an identity to a workspace as a plain member.
    ///
    /// Join-code redemption lives outside this core, so tests insert the
    /// member row the way that flow would.
    pub async fn join_workspace(
        &self,
        workspace_id: RecordId,
        identity: Identity,
    ) -> Result<RecordId> {
        let user_id = identity.require()?;
        let member = Member::new(self.ctx.generate_id(), workspace_id, user_id);
        let member_id = member.id;
        self.ctx.member_repo().create(&member).await?;
        Ok(member_id)
    }

    /// Create a channel as the given (admin) identity
    pub async fn seed_channel(
        &self,
        identity: Identity,
        workspace_id: RecordId,
        name: &str,
    ) -> Result<RecordId> {
        let channel_id = ChannelService::new(&self.ctx)
            .create(
                identity,
                CreateChannelRequest {
                    workspace_id,
                    name: name.to_string(),
                },
            )
            .await?;
        Ok(channel_id)
    }
}

/// A workspace with its admin and one plain member
#[derive(Debug, Clone, Copy)]
pub struct SeededWorkspace {
    pub workspace_id: RecordId,
    pub admin: Identity,
    pub admin_member_id: RecordId,
    pub member: Identity,
    pub member_id: RecordId,
}
