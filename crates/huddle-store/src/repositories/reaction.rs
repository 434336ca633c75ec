//! Reaction repository over the in-memory tables
//!
//! `toggle` is the atomic state flip for the reaction race: the existence
//! check and the insert/delete both happen under the table's write lock,
//! so two rapid toggles by the same member and value can never
//! double-insert.

use async_trait::async_trait;
use tracing::debug;

use huddle_core::traits::{ReactionRepository, RepoResult};
use huddle_core::{Reaction, RecordId};

use crate::tables::SharedTables;

pub struct MemoryReactionRepository {
    tables: SharedTables,
}

impl MemoryReactionRepository {
    pub fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ReactionRepository for MemoryReactionRepository {
    async fn find_by_message(&self, message_id: RecordId) -> RepoResult<Vec<Reaction>> {
        // Key order is insertion order, which the aggregation's
        // first-seen-value ordering depends on.
        Ok(self
            .tables
            .reactions
            .read()
            .values()
            .filter(|reaction| reaction.message_id == message_id)
            .cloned()
            .collect())
    }

    async fn toggle(&self, reaction: Reaction) -> RepoResult<bool> {
        let mut reactions = self.tables.reactions.write();

        let existing = reactions
            .values()
            .find(|r| {
                r.message_id == reaction.message_id
                    && r.member_id == reaction.member_id
                    && r.value == reaction.value
            })
            .map(|r| r.id);

        match existing {
            Some(id) => {
                reactions.remove(&id);
                debug!(message_id = %reaction.message_id, value = %reaction.value, "reaction removed");
                Ok(false)
            }
            None => {
                debug!(message_id = %reaction.message_id, value = %reaction.value, "reaction added");
                reactions.insert(reaction.id, reaction);
                Ok(true)
            }
        }
    }

    async fn delete_by_message(&self, message_id: RecordId) -> RepoResult<()> {
        self.tables
            .reactions
            .write()
            .retain(|_, reaction| reaction.message_id != message_id);
        Ok(())
    }
}
