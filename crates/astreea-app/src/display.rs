//! Terminal rendering of conversation messages.

use astreea_chat::{Author, DisplayBlock, Message};
use chrono::Local;

/// Format one display block as a terminal line.
pub fn format_block(block: &DisplayBlock) -> String {
    match block {
        DisplayBlock::Heading { text } => format!("== {} ==", text),
        DisplayBlock::LabeledBullet { .. } => format!("  {}", block),
        DisplayBlock::Plain { text } => text.clone(),
        DisplayBlock::Spacer => String::new(),
    }
}

/// Format a message with its local time and author.
pub fn format_message(message: &Message) -> String {
    let time = message.created_at.with_timezone(&Local).format("%H:%M:%S");
    match message.author {
        Author::User => format!("[{}] You: {}", time, message.raw_text),
        Author::Assistant => {
            let mut out = format!("[{}] Assistant:", time);
            for block in &message.blocks {
                out.push('\n');
                out.push_str(&format_block(block));
            }
            out
        }
    }
}
