//! Conversational support engine for Astreea chargers.
//!
//! Classifies free-text questions against an ordered keyword table, renders
//! the chosen response template into display blocks, and sequences replies
//! inside a conversation session.

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod render;
pub mod session;
pub mod types;

pub use catalog::{
    Category, CategoryId, CategoryTable, QuickAction, QuickActionKind, GENERAL_TEMPLATE,
    GREETING_TEMPLATE, QUICK_ACTIONS,
};
pub use classifier::{Classification, IntentClassifier};
pub use error::ChatError;
pub use render::{render, render_line, DisplayBlock};
pub use session::ChatSession;
pub use types::{Author, Message, MessageId, SessionEvent, SessionId};
