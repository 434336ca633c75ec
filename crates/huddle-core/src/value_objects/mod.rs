//! Value objects - identifiers and identity

mod identity;
mod record_id;

pub use identity::Identity;
pub use record_id::{RecordId, RecordIdGenerator, RecordIdParseError};
