//! Repository implementations

mod channel;
mod conversation;
mod member;
mod message;
mod reaction;
mod workspace;

pub use channel::MemoryChannelRepository;
pub use conversation::MemoryConversationRepository;
pub use member::MemoryMemberRepository;
pub use message::MemoryMessageRepository;
pub use reaction::MemoryReactionRepository;
pub use workspace::MemoryWorkspaceRepository;
