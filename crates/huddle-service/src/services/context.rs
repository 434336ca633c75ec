//! Service context - dependency container for services
//!
//! Holds the repositories, the event bus, and the id generator every
//! service needs.

use std::sync::Arc;

use huddle_bus::EventBus;
use huddle_core::traits::{
    ChannelRepository, ConversationRepository, MemberRepository, MessageRepository,
    ReactionRepository, WorkspaceRepository,
};
use huddle_core::{RecordId, RecordIdGenerator};

use super::ServiceResult;
use huddle_core::DomainError;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    workspace_repo: Arc<dyn WorkspaceRepository>,
    member_repo: Arc<dyn MemberRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    conversation_repo: Arc<dyn ConversationRepository>,
    message_repo: Arc<dyn MessageRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    bus: EventBus,
    id_generator: Arc<RecordIdGenerator>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the workspace repository
    pub fn workspace_repo(&self) -> &dyn WorkspaceRepository {
        self.workspace_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the conversation repository
    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the event bus
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Generate a new `RecordId`
    pub fn generate_id(&self) -> RecordId {
        self.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("bus", &self.bus)
            .finish()
    }
}

/// Builder for `ServiceContext`
#[derive(Default)]
pub struct ServiceContextBuilder {
    workspace_repo: Option<Arc<dyn WorkspaceRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    bus: Option<EventBus>,
    id_generator: Option<Arc<RecordIdGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workspace_repo(mut self, repo: Arc<dyn WorkspaceRepository>) -> Self {
        self.workspace_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn id_generator(mut self, generator: Arc<RecordIdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Build the `ServiceContext`
    ///
    /// # Errors
    /// Returns `DomainError::Validation` if a repository is missing. The
    /// bus and id generator default to fresh instances.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn require<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| DomainError::Validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            workspace_repo: require(self.workspace_repo, "workspace_repo")?,
            member_repo: require(self.member_repo, "member_repo")?,
            channel_repo: require(self.channel_repo, "channel_repo")?,
            conversation_repo: require(self.conversation_repo, "conversation_repo")?,
            message_repo: require(self.message_repo, "message_repo")?,
            reaction_repo: require(self.reaction_repo, "reaction_repo")?,
            bus: self.bus.unwrap_or_default(),
            id_generator: self.id_generator.unwrap_or_default(),
        })
    }
}
