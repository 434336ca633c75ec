//! Member repository over the in-memory tables

use async_trait::async_trait;

use huddle_core::traits::{MemberRepository, RepoResult};
use huddle_core::{DomainError, Member, RecordId};

use crate::tables::SharedTables;

pub struct MemoryMemberRepository {
    tables: SharedTables,
}

impl MemoryMemberRepository {
    pub fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn find(
        &self,
        workspace_id: RecordId,
        user_id: RecordId,
    ) -> RepoResult<Option<Member>> {
        Ok(self
            .tables
            .members
            .read()
            .values()
            .find(|member| member.workspace_id == workspace_id && member.user_id == user_id)
            .cloned())
    }

    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Member>> {
        Ok(self.tables.members.read().get(&id).cloned())
    }

    async fn find_by_workspace(&self, workspace_id: RecordId) -> RepoResult<Vec<Member>> {
        Ok(self
            .tables
            .members
            .read()
            .values()
            .filter(|member| member.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn create(&self, member: &Member) -> RepoResult<()> {
        let mut members = self.tables.members.write();

        // One member row per (workspace, user); the check runs under the
        // write lock so racing joins cannot both insert.
        let duplicate = members
            .values()
            .any(|m| m.workspace_id == member.workspace_id && m.user_id == member.user_id);
        if duplicate {
            return Err(DomainError::Conflict("member already exists"));
        }

        members.insert(member.id, member.clone());
        Ok(())
    }
}
