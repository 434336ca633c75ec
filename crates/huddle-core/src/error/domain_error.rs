//! Domain errors - per-request outcomes, never fatal to the process
//!
//! Mutations surface these to the caller; queries deliberately degrade to
//! empty/`None` on authorization failure instead of raising. `NotFound` and
//! lack of visibility are merged on read paths to avoid existence leakage.

use thiserror::Error;

use crate::value_objects::RecordId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Authentication / Authorization
    // =========================================================================
    #[error("No authenticated identity")]
    Unauthenticated,

    #[error("Insufficient membership or role")]
    Forbidden,

    // =========================================================================
    // Not Found
    // =========================================================================
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(RecordId),

    #[error("Channel not found: {0}")]
    ChannelNotFound(RecordId),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(RecordId),

    #[error("Message not found: {0}")]
    MessageNotFound(RecordId),

    #[error("Member not found in workspace")]
    MemberNotFound,

    // =========================================================================
    // Validation / References
    // =========================================================================
    #[error("Invalid reference: {0}")]
    InvalidReference(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    // =========================================================================
    // Concurrency
    // =========================================================================
    #[error("Conflict: {0}")]
    Conflict(&'static str),

    // =========================================================================
    // Infrastructure (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Error code string for API responses and logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::WorkspaceNotFound(_) => "UNKNOWN_WORKSPACE",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WorkspaceNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::MessageNotFound(_)
                | Self::MemberNotFound
        )
    }

    /// Check if this is an authentication or authorization failure
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Forbidden)
    }

    /// Check if this is a concurrency conflict
    ///
    /// Conflicts are retried inside the store and must never reach callers;
    /// this helper exists for the store's own retry logic and for tests.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
