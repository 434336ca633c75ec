//! Message repository over the in-memory tables
//!
//! Record ids are time-ordered, so key order on the messages table is
//! chronological order. Paged queries walk the table newest-first and cut
//! at the cursor.

use async_trait::async_trait;

use huddle_core::traits::{MessageQuery, MessageRepository, MessageScope, RepoResult};
use huddle_core::{DomainError, Message, RecordId};

use crate::tables::SharedTables;

pub struct MemoryMessageRepository {
    tables: SharedTables,
}

impl MemoryMessageRepository {
    pub fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl MessageRepository for MemoryMessageRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Message>> {
        Ok(self.tables.messages.read().get(&id).cloned())
    }

    async fn find_page(
        &self,
        scope: MessageScope,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>> {
        let messages = self.tables.messages.read();

        Ok(messages
            .values()
            .rev()
            .filter(|message| scope.matches(message))
            .filter(|message| query.before.is_none_or(|before| message.id < before))
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn find_replies(&self, parent_message_id: RecordId) -> RepoResult<Vec<Message>> {
        Ok(self
            .tables
            .messages
            .read()
            .values()
            .filter(|message| message.parent_message_id == Some(parent_message_id))
            .cloned()
            .collect())
    }

    async fn find_all_in_channel(&self, channel_id: RecordId) -> RepoResult<Vec<Message>> {
        Ok(self
            .tables
            .messages
            .read()
            .values()
            .filter(|message| message.channel_id == Some(channel_id))
            .cloned()
            .collect())
    }

    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.tables
            .messages
            .write()
            .insert(message.id, message.clone());
        Ok(())
    }

    async fn update(&self, message: &Message) -> RepoResult<()> {
        let mut messages = self.tables.messages.write();
        match messages.get_mut(&message.id) {
            Some(existing) => {
                *existing = message.clone();
                Ok(())
            }
            None => Err(DomainError::MessageNotFound(message.id)),
        }
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.tables.messages.write().remove(&id);
        Ok(())
    }
}
