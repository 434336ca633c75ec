//! Channel entity - a named, many-member messaging scope

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: RecordId,
    pub workspace_id: RecordId,
    /// Normalized name, see [`normalize_channel_name`]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    /// Create a new Channel, normalizing the raw name
    pub fn new(id: RecordId, workspace_id: RecordId, raw_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            workspace_id,
            name: normalize_channel_name(raw_name),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the channel, re-normalizing the raw name
    pub fn rename(&mut self, raw_name: &str) {
        self.name = normalize_channel_name(raw_name);
        self.updated_at = Utc::now();
    }
}

/// Normalize a channel name: runs of whitespace become a single hyphen,
/// runs of hyphens collapse to one, everything lowercased.
///
/// `"  test-create---channel  "` becomes `"test-create-channel"`.
pub fn normalize_channel_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_hyphen = false;

    for c in raw.trim().chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.extend(c.to_lowercase());
        }
    }

    out
}
