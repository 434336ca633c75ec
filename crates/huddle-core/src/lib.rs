//! # huddle-core
//!
//! Domain layer containing entities, value objects, repository traits, and
//! domain events. This crate has zero dependencies on infrastructure
//! (storage, transport, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    aggregate_reactions, canonical_pair, generate_join_code, normalize_channel_name, Channel,
    Conversation, Destination, Member, MemberRole, Message, Reaction, ReactionGroup, Workspace,
};
pub use error::DomainError;
pub use events::ChatEvent;
pub use traits::{
    ChannelRepository, ConversationRepository, MemberRepository, MessageQuery, MessageRepository,
    MessageScope, ReactionRepository, RepoResult, WorkspaceRepository,
};
pub use value_objects::{Identity, RecordId, RecordIdGenerator, RecordIdParseError};
