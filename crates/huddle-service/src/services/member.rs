//! Member service - the membership authority
//!
//! Every read or write in every other service starts here: the caller's
//! identity is resolved to a member of the target workspace, or the
//! operation is rejected. Queries use [`MemberService::current`], which
//! degrades to `None` instead of failing.

use tracing::instrument;

use huddle_core::{DomainError, Identity, Member, RecordId};

use super::context::ServiceContext;
use super::ServiceResult;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the caller to a member of the workspace, or fail.
    ///
    /// `Unauthenticated` without an identity, `Forbidden` without a member
    /// row. Mutation paths call this.
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        identity: Identity,
        workspace_id: RecordId,
    ) -> ServiceResult<Member> {
        let user_id = identity.require()?;
        self.ctx
            .member_repo()
            .find(workspace_id, user_id)
            .await?
            .ok_or(DomainError::Forbidden)
    }

    /// Resolve the caller and additionally require the admin role
    #[instrument(skip(self))]
    pub async fn require_admin(
        &self,
        identity: Identity,
        workspace_id: RecordId,
    ) -> ServiceResult<Member> {
        let member = self.resolve(identity, workspace_id).await?;
        if !member.is_admin() {
            return Err(DomainError::Forbidden);
        }
        Ok(member)
    }

    /// Query form of [`resolve`](Self::resolve): `None` instead of an error
    #[instrument(skip(self))]
    pub async fn current(
        &self,
        identity: Identity,
        workspace_id: RecordId,
    ) -> ServiceResult<Option<Member>> {
        let Some(user_id) = identity.user_id() else {
            return Ok(None);
        };
        self.ctx.member_repo().find(workspace_id, user_id).await
    }

    /// List members of a workspace; outsiders get an empty sequence
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        identity: Identity,
        workspace_id: RecordId,
    ) -> ServiceResult<Vec<Member>> {
        if self.current(identity, workspace_id).await?.is_none() {
            return Ok(Vec::new());
        }
        self.ctx.member_repo().find_by_workspace(workspace_id).await
    }
}
