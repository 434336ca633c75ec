//! Channel repository over the in-memory tables

use async_trait::async_trait;

use huddle_core::traits::{ChannelRepository, RepoResult};
use huddle_core::{Channel, DomainError, RecordId};

use crate::tables::SharedTables;

pub struct MemoryChannelRepository {
    tables: SharedTables,
}

impl MemoryChannelRepository {
    pub fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ChannelRepository for MemoryChannelRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Channel>> {
        Ok(self.tables.channels.read().get(&id).cloned())
    }

    async fn find_by_workspace(&self, workspace_id: RecordId) -> RepoResult<Vec<Channel>> {
        Ok(self
            .tables
            .channels
            .read()
            .values()
            .filter(|channel| channel.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        self.tables
            .channels
            .write()
            .insert(channel.id, channel.clone());
        Ok(())
    }

    async fn update(&self, channel: &Channel) -> RepoResult<()> {
        let mut channels = self.tables.channels.write();
        match channels.get_mut(&channel.id) {
            Some(existing) => {
                *existing = channel.clone();
                Ok(())
            }
            None => Err(DomainError::ChannelNotFound(channel.id)),
        }
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.tables.channels.write().remove(&id);
        Ok(())
    }
}
