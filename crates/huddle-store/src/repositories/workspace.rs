//! Workspace repository over the in-memory tables

use async_trait::async_trait;

use huddle_core::traits::{RepoResult, WorkspaceRepository};
use huddle_core::{RecordId, Workspace};

use crate::tables::SharedTables;

pub struct MemoryWorkspaceRepository {
    tables: SharedTables,
}

impl MemoryWorkspaceRepository {
    pub fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl WorkspaceRepository for MemoryWorkspaceRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Workspace>> {
        Ok(self.tables.workspaces.read().get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Workspace>> {
        // Membership rows drive visibility; a workspace with no member row
        // for this user does not exist as far as they are concerned.
        let workspace_ids: Vec<RecordId> = self
            .tables
            .members
            .read()
            .values()
            .filter(|member| member.user_id == user_id)
            .map(|member| member.workspace_id)
            .collect();

        let workspaces = self.tables.workspaces.read();
        Ok(workspace_ids
            .into_iter()
            .filter_map(|id| workspaces.get(&id).cloned())
            .collect())
    }

    async fn create(&self, workspace: &Workspace) -> RepoResult<()> {
        self.tables
            .workspaces
            .write()
            .insert(workspace.id, workspace.clone());
        Ok(())
    }
}
