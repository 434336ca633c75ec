//! Reaction entity - an emoji reaction on a message

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Reaction entity
///
/// Unique per (message, member, value); the toggle operation enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: RecordId,
    pub workspace_id: RecordId,
    pub message_id: RecordId,
    pub member_id: RecordId,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(
        id: RecordId,
        workspace_id: RecordId,
        message_id: RecordId,
        member_id: RecordId,
        value: String,
    ) -> Self {
        Self {
            id,
            workspace_id,
            message_id,
            member_id,
            value,
            created_at: Utc::now(),
        }
    }
}

/// Aggregated reactions on one message, grouped by value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionGroup {
    pub value: String,
    pub count: usize,
    pub member_ids: Vec<RecordId>,
}

/// Group reactions by value, preserving insertion order of first-seen values.
///
/// Count is the number of distinct members holding the value. Ordering is
/// deterministic: values appear in the order they were first reacted with,
/// never count-sorted.
pub fn aggregate_reactions(reactions: &[Reaction]) -> Vec<ReactionGroup> {
    let mut groups: Vec<ReactionGroup> = Vec::new();

    for reaction in reactions {
        match groups.iter_mut().find(|g| g.value == reaction.value) {
            Some(group) => {
                if !group.member_ids.contains(&reaction.member_id) {
                    group.member_ids.push(reaction.member_id);
                    group.count += 1;
                }
            }
            None => groups.push(ReactionGroup {
                value: reaction.value.clone(),
                count: 1,
                member_ids: vec![reaction.member_id],
            }),
        }
    }

    groups
}
