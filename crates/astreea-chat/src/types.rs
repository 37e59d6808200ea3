//! Conversation data types shared by the session and display layers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CategoryId;
use crate::render::DisplayBlock;

/// Identifier of a conversation session, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form: first 8 chars of the UUID.
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Per-session message identifier, strictly increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Assistant,
}

/// One entry of the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub author: Author,
    /// Text as typed by the user, or the template an assistant reply came from.
    pub raw_text: String,
    /// Rendered blocks. Always empty for user messages.
    pub blocks: Vec<DisplayBlock>,
    /// Category that produced an assistant reply.
    pub category: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

/// Change notifications published by a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A message was appended to the log.
    MessageAppended(Message),
    /// The composing indicator flipped.
    ComposingChanged(bool),
    /// The log was cleared and re-seeded with the greeting.
    Reset,
}
