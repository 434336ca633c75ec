//! Domain entities

mod channel;
mod conversation;
mod member;
mod message;
mod reaction;
mod workspace;

pub use channel::{normalize_channel_name, Channel};
pub use conversation::{canonical_pair, Conversation};
pub use member::{Member, MemberRole};
pub use message::{Destination, Message};
pub use reaction::{aggregate_reactions, Reaction, ReactionGroup};
pub use workspace::{generate_join_code, Workspace};
