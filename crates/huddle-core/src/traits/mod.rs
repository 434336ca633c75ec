//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ChannelRepository, ConversationRepository, MemberRepository, MessageQuery,
    MessageRepository, MessageScope, ReactionRepository, RepoResult, WorkspaceRepository,
};
