//! Workspace service
//!
//! Workspace creation and membership-scoped listing. Listing requires an
//! authenticated caller and only returns their own workspaces.

use tracing::{info, instrument};
use validator::Validate;

use huddle_core::{DomainError, Identity, Member, RecordId, Workspace};

use crate::dto::CreateWorkspaceRequest;

use super::context::ServiceContext;
use super::ServiceResult;

/// Workspace service
pub struct WorkspaceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WorkspaceService<'a> {
    /// Create a new WorkspaceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a workspace; the creator becomes its first admin member
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        identity: Identity,
        request: CreateWorkspaceRequest,
    ) -> ServiceResult<RecordId> {
        let user_id = identity.require()?;
        request
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        let workspace = Workspace::new(self.ctx.generate_id(), request.name, user_id);
        let workspace_id = workspace.id;
        self.ctx.workspace_repo().create(&workspace).await?;

        let admin = Member::new_admin(self.ctx.generate_id(), workspace_id, user_id);
        self.ctx.member_repo().create(&admin).await?;

        info!(workspace_id = %workspace_id, "workspace created");
        Ok(workspace_id)
    }

    /// List the caller's workspaces; unauthenticated callers get nothing
    #[instrument(skip(self))]
    pub async fn list(&self, identity: Identity) -> ServiceResult<Vec<Workspace>> {
        let Some(user_id) = identity.user_id() else {
            return Ok(Vec::new());
        };
        self.ctx.workspace_repo().find_by_user(user_id).await
    }

    /// Fetch a workspace the caller belongs to, `None` otherwise
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        identity: Identity,
        workspace_id: RecordId,
    ) -> ServiceResult<Option<Workspace>> {
        let Some(user_id) = identity.user_id() else {
            return Ok(None);
        };
        if self
            .ctx
            .member_repo()
            .find(workspace_id, user_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }
        self.ctx.workspace_repo().find_by_id(workspace_id).await
    }
}
