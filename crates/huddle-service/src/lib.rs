//! # huddle-service
//!
//! Application layer: the messaging and authorization engine's use cases.
//! Each operation resolves the caller's identity to a workspace member
//! first; mutations reject missing or insufficient membership loudly while
//! queries degrade to empty results.

pub mod dto;
pub mod services;

pub use dto::{CreateChannelRequest, CreateMessageRequest, CreateWorkspaceRequest};
pub use services::{
    ChannelService, ConversationService, MemberService, MessageService, ReactionService,
    ServiceContext, ServiceContextBuilder, ServiceResult, WorkspaceService,
};
