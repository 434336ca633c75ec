//! Shared table state for the in-memory store
//!
//! One `RwLock`ed ordered map per entity. Record ids are time-ordered, so
//! iterating a table in key order is chronological order; the message and
//! reaction queries rely on this.
//!
//! The two composite operations the concurrency model calls out
//! (conversation find-or-create, reaction toggle) take a table's write lock
//! for their whole check-and-write section, which serializes racing callers.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use huddle_core::{Channel, Conversation, Member, Message, Reaction, Workspace, RecordId};

/// All tables of the store
#[derive(Debug, Default)]
pub struct Tables {
    pub workspaces: RwLock<BTreeMap<RecordId, Workspace>>,
    pub members: RwLock<BTreeMap<RecordId, Member>>,
    pub channels: RwLock<BTreeMap<RecordId, Channel>>,
    pub conversations: RwLock<BTreeMap<RecordId, Conversation>>,
    pub messages: RwLock<BTreeMap<RecordId, Message>>,
    pub reactions: RwLock<BTreeMap<RecordId, Reaction>>,
}

/// Shared handle to the tables
pub type SharedTables = Arc<Tables>;
