//! Shell command and reply models
//!
//! Commands are parsed from plain text lines; replies are serialized to
//! JSON lines.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{Command, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
pub use responses::{
    DeleteReply, ErrorReply, FindReply, GetReply, HasReply, KeysReply, MessageReply, Reply,
    SetReply, StatsReply, TouchReply, ValuesReply,
};
