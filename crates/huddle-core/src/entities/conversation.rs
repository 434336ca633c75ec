//! Conversation entity - a 1:1 messaging scope between two members

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Conversation entity
///
/// The member pair is logically unordered; at most one conversation exists
/// per pair per workspace. [`Conversation::pair_key`] gives the canonical
/// ordering used to enforce uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: RecordId,
    pub workspace_id: RecordId,
    pub member_one_id: RecordId,
    pub member_two_id: RecordId,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new Conversation between two members
    pub fn new(
        id: RecordId,
        workspace_id: RecordId,
        member_one_id: RecordId,
        member_two_id: RecordId,
    ) -> Self {
        Self {
            id,
            workspace_id,
            member_one_id,
            member_two_id,
            created_at: Utc::now(),
        }
    }

    /// Canonical (min, max) ordering of the member pair
    #[inline]
    pub fn pair_key(&self) -> (RecordId, RecordId) {
        canonical_pair(self.member_one_id, self.member_two_id)
    }

    /// Check whether the conversation is between the given pair,
    /// in either order
    pub fn is_between(&self, a: RecordId, b: RecordId) -> bool {
        self.pair_key() == canonical_pair(a, b)
    }

    /// Check whether a member participates in this conversation
    #[inline]
    pub fn involves(&self, member_id: RecordId) -> bool {
        self.member_one_id == member_id || self.member_two_id == member_id
    }
}

/// Canonical ordering for an unordered member pair
#[inline]
pub fn canonical_pair(a: RecordId, b: RecordId) -> (RecordId, RecordId) {
    if a <= b { (a, b) } else { (b, a) }
}
