//! Conversation repository over the in-memory tables
//!
//! `find_or_create` is the serialized critical section for the conversation
//! creation race: the whole check-both-orderings-then-insert sequence runs
//! under the table's write lock, so concurrent duplicate attempts for the
//! same pair resolve to a single winner.

use async_trait::async_trait;
use tracing::debug;

use huddle_core::traits::{ConversationRepository, RepoResult};
use huddle_core::{Conversation, RecordId};

use crate::tables::SharedTables;

pub struct MemoryConversationRepository {
    tables: SharedTables,
}

impl MemoryConversationRepository {
    pub fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ConversationRepository for MemoryConversationRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Conversation>> {
        Ok(self.tables.conversations.read().get(&id).cloned())
    }

    async fn find_pair(
        &self,
        workspace_id: RecordId,
        member_a: RecordId,
        member_b: RecordId,
    ) -> RepoResult<Option<Conversation>> {
        Ok(self
            .tables
            .conversations
            .read()
            .values()
            .find(|conversation| {
                conversation.workspace_id == workspace_id
                    && conversation.is_between(member_a, member_b)
            })
            .cloned())
    }

    async fn find_or_create(
        &self,
        workspace_id: RecordId,
        member_a: RecordId,
        member_b: RecordId,
        new_id: RecordId,
    ) -> RepoResult<Conversation> {
        let mut conversations = self.tables.conversations.write();

        // is_between covers both (A,B) and (B,A).
        if let Some(existing) = conversations.values().find(|conversation| {
            conversation.workspace_id == workspace_id
                && conversation.is_between(member_a, member_b)
        }) {
            return Ok(existing.clone());
        }

        let conversation = Conversation::new(new_id, workspace_id, member_a, member_b);
        conversations.insert(conversation.id, conversation.clone());
        debug!(conversation_id = %conversation.id, "conversation created");
        Ok(conversation)
    }
}
