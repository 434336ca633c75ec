//! Repository traits (ports) - the interface the domain expects from storage
//!
//! The domain layer defines what it needs; the storage layer provides the
//! implementation. Two operations live inside the port rather than being
//! composed from find + create in the service layer, because they must be
//! atomic per key under concurrent writers: conversation find-or-create and
//! reaction toggle.

use async_trait::async_trait;

use crate::entities::{
    Channel, Conversation, Destination, Member, Message, Reaction, Workspace,
};
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// The set of messages a reader is looking at: a channel or conversation,
/// optionally narrowed to one thread.
///
/// A scope without a parent filter matches only top-level messages; thread
/// replies never appear in their channel's or conversation's main timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageScope {
    pub destination: Destination,
    pub parent_message_id: Option<RecordId>,
}

impl MessageScope {
    /// Top-level messages of a channel
    pub fn channel(channel_id: RecordId) -> Self {
        Self {
            destination: Destination::Channel(channel_id),
            parent_message_id: None,
        }
    }

    /// Top-level messages of a conversation
    pub fn conversation(conversation_id: RecordId) -> Self {
        Self {
            destination: Destination::Conversation(conversation_id),
            parent_message_id: None,
        }
    }

    /// Narrow the scope to replies of one parent message
    pub fn thread(mut self, parent_message_id: RecordId) -> Self {
        self.parent_message_id = Some(parent_message_id);
        self
    }

    /// Check whether a message falls inside this scope
    pub fn matches(&self, message: &Message) -> bool {
        let destination_matches = match self.destination {
            Destination::Channel(id) => message.channel_id == Some(id),
            Destination::Conversation(id) => message.conversation_id == Some(id),
        };
        destination_matches && message.parent_message_id == self.parent_message_id
    }
}

/// Pagination options for message queries
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageQuery {
    /// Only messages with an id strictly below this one (older)
    pub before: Option<RecordId>,
    pub limit: usize,
}

// ============================================================================
// Workspace Repository
// ============================================================================

#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Find workspace by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Workspace>>;

    /// List workspaces a user is a member of
    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Workspace>>;

    /// Create a new workspace
    async fn create(&self, workspace: &Workspace) -> RepoResult<()>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find a member by workspace and user - the membership check behind
    /// every operation
    async fn find(&self, workspace_id: RecordId, user_id: RecordId)
        -> RepoResult<Option<Member>>;

    /// Find a member by its own id
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Member>>;

    /// List members of a workspace
    async fn find_by_workspace(&self, workspace_id: RecordId) -> RepoResult<Vec<Member>>;

    /// Add a member to a workspace
    async fn create(&self, member: &Member) -> RepoResult<()>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Channel>>;

    /// List channels of a workspace
    async fn find_by_workspace(&self, workspace_id: RecordId) -> RepoResult<Vec<Channel>>;

    /// Create a new channel
    async fn create(&self, channel: &Channel) -> RepoResult<()>;

    /// Update an existing channel (rename)
    async fn update(&self, channel: &Channel) -> RepoResult<()>;

    /// Delete a channel row; the service cascades dependents first
    async fn delete(&self, id: RecordId) -> RepoResult<()>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find conversation by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Conversation>>;

    /// Find the conversation between two members, checking both orderings
    async fn find_pair(
        &self,
        workspace_id: RecordId,
        member_a: RecordId,
        member_b: RecordId,
    ) -> RepoResult<Option<Conversation>>;

    /// Find the conversation for the pair, or create it with `new_id`.
    ///
    /// Atomic: concurrent callers for the same pair all receive the same
    /// conversation. `new_id` is discarded when the pair already exists.
    async fn find_or_create(
        &self,
        workspace_id: RecordId,
        member_a: RecordId,
        member_b: RecordId,
        new_id: RecordId,
    ) -> RepoResult<Conversation>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Message>>;

    /// One page of a scope, newest-first
    async fn find_page(&self, scope: MessageScope, query: MessageQuery)
        -> RepoResult<Vec<Message>>;

    /// All thread replies of a parent message
    async fn find_replies(&self, parent_message_id: RecordId) -> RepoResult<Vec<Message>>;

    /// Every message in a channel, including thread replies (for cascades)
    async fn find_all_in_channel(&self, channel_id: RecordId) -> RepoResult<Vec<Message>>;

    /// Insert a new message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Update message body and edit timestamp
    async fn update(&self, message: &Message) -> RepoResult<()>;

    /// Delete a message row; the service cascades dependents first
    async fn delete(&self, id: RecordId) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// All reactions on a message, in insertion order
    async fn find_by_message(&self, message_id: RecordId) -> RepoResult<Vec<Reaction>>;

    /// Toggle the reaction described by `reaction`: if a row for
    /// (message, member, value) exists it is removed and `false` is
    /// returned; otherwise the row is inserted and `true` is returned.
    ///
    /// Atomic per key: rapid repeated toggles can never double-insert.
    async fn toggle(&self, reaction: Reaction) -> RepoResult<bool>;

    /// Remove all reactions on a message (for cascades)
    async fn delete_by_message(&self, message_id: RecordId) -> RepoResult<()>;
}
