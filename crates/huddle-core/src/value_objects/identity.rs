//! Identity - the authenticated caller of an operation
//!
//! The identity provider hands every request an opaque user id, or nothing.
//! Services receive the identity as an explicit parameter; there is no
//! ambient "current user". Mutations reject an empty identity loudly,
//! queries degrade to empty results.

use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Authenticated caller identity, possibly absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Identity(Option<RecordId>);

impl Identity {
    /// An authenticated identity for the given user id
    #[inline]
    pub const fn user(user_id: RecordId) -> Self {
        Self(Some(user_id))
    }

    /// The unauthenticated identity
    #[inline]
    pub const fn anonymous() -> Self {
        Self(None)
    }

    /// The user id, if authenticated
    #[inline]
    pub const fn user_id(&self) -> Option<RecordId> {
        self.0
    }

    /// The user id, or `Unauthenticated` - for mutation paths
    pub fn require(&self) -> Result<RecordId, DomainError> {
        self.0.ok_or(DomainError::Unauthenticated)
    }

    #[inline]
    pub const fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl From<RecordId> for Identity {
    fn from(user_id: RecordId) -> Self {
        Self::user(user_id)
    }
}
