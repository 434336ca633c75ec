//! Data transfer objects

mod requests;

pub use requests::{CreateChannelRequest, CreateMessageRequest, CreateWorkspaceRequest};
