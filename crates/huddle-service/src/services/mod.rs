//! Application services
//!
//! One service per component of the messaging core. Services are thin,
//! borrow the shared [`ServiceContext`], and follow the same shape:
//! resolve the caller's membership, authorize, write, log, publish.

mod channel;
mod context;
mod conversation;
mod member;
mod message;
mod reaction;
mod workspace;

pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use conversation::ConversationService;
pub use member::MemberService;
pub use message::MessageService;
pub use reaction::ReactionService;
pub use workspace::WorkspaceService;

use huddle_core::DomainError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, DomainError>;
