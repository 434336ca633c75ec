//! # huddle-store
//!
//! In-memory multi-writer document store implementing the repository ports
//! from `huddle-core`. Tables are `RwLock`ed ordered maps; the two
//! composite operations the domain needs to be race-free (conversation
//! find-or-create, reaction toggle) run entirely under a table write lock.
//!
//! The ports keep the seam where a SQL-backed implementation would plug in.

mod repositories;
mod tables;

pub use repositories::{
    MemoryChannelRepository, MemoryConversationRepository, MemoryMemberRepository,
    MemoryMessageRepository, MemoryReactionRepository, MemoryWorkspaceRepository,
};
pub use tables::{SharedTables, Tables};

use std::sync::Arc;

use huddle_core::traits::{
    ChannelRepository, ConversationRepository, MemberRepository, MessageRepository,
    ReactionRepository, WorkspaceRepository,
};

/// The store: one shared set of tables plus a repository handle per entity
#[derive(Clone)]
pub struct MemoryStore {
    tables: SharedTables,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Tables::default()),
        }
    }

    pub fn workspaces(&self) -> Arc<dyn WorkspaceRepository> {
        Arc::new(MemoryWorkspaceRepository::new(Arc::clone(&self.tables)))
    }

    pub fn members(&self) -> Arc<dyn MemberRepository> {
        Arc::new(MemoryMemberRepository::new(Arc::clone(&self.tables)))
    }

    pub fn channels(&self) -> Arc<dyn ChannelRepository> {
        Arc::new(MemoryChannelRepository::new(Arc::clone(&self.tables)))
    }

    pub fn conversations(&self) -> Arc<dyn ConversationRepository> {
        Arc::new(MemoryConversationRepository::new(Arc::clone(&self.tables)))
    }

    pub fn messages(&self) -> Arc<dyn MessageRepository> {
        Arc::new(MemoryMessageRepository::new(Arc::clone(&self.tables)))
    }

    pub fn reactions(&self) -> Arc<dyn ReactionRepository> {
        Arc::new(MemoryReactionRepository::new(Arc::clone(&self.tables)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("workspaces", &self.tables.workspaces.read().len())
            .field("messages", &self.tables.messages.read().len())
            .finish()
    }
}
