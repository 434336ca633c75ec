//! Domain events

mod chat_event;

pub use chat_event::ChatEvent;
