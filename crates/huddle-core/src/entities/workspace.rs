//! Workspace entity - the top-level tenant boundary

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Workspace entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub id: RecordId,
    pub name: String,
    pub join_code: String,
    pub owner_user_id: RecordId,
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    /// Create a new Workspace with a fresh join code
    pub fn new(id: RecordId, name: String, owner_user_id: RecordId) -> Self {
        Self {
            id,
            name,
            join_code: generate_join_code(),
            owner_user_id,
            created_at: Utc::now(),
        }
    }

    /// Check whether a presented code matches the workspace's join code
    #[inline]
    pub fn accepts_join_code(&self, code: &str) -> bool {
        self.join_code == code
    }
}

/// Generate a random 6-character alphanumeric join code
///
/// Join-code redemption is handled outside this core; the workspace only
/// owns the secret.
pub fn generate_join_code() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    const CODE_LEN: usize = 6;

    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
