//! Member entity - a user's identity scoped to one workspace
//!
//! Messages and reactions reference the member id, never the raw user id,
//! so authorship inside a workspace survives user-profile changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::RecordId;

/// Role of a member within a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
}

/// Member entity (junction between user and workspace)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: RecordId,
    pub workspace_id: RecordId,
    pub user_id: RecordId,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// Create a new Member with the default role
    pub fn new(id: RecordId, workspace_id: RecordId, user_id: RecordId) -> Self {
        Self {
            id,
            workspace_id,
            user_id,
            role: MemberRole::Member,
            joined_at: Utc::now(),
        }
    }

    /// Create a new Member with the admin role
    pub fn new_admin(id: RecordId, workspace_id: RecordId, user_id: RecordId) -> Self {
        Self {
            role: MemberRole::Admin,
            ..Self::new(id, workspace_id, user_id)
        }
    }

    /// Check whether this member may perform admin-gated operations
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}
