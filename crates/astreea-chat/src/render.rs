//! Template rendering into display blocks.
//!
//! Templates are plain text with a three-shape line grammar:
//!
//! ```text
//! • **Label**: body      -> LabeledBullet
//! **Heading**            -> Heading
//! anything else          -> Plain (verbatim)
//! (blank)                -> Spacer
//! ```
//!
//! Inline bold markers inside other lines are left untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

const BULLET_LABEL_OPEN: &str = "• **";
const LABEL_CLOSE: &str = "**:";
const BOLD: &str = "**";

/// One formatted unit of assistant output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayBlock {
    Heading { text: String },
    LabeledBullet { label: String, body: String },
    Plain { text: String },
    Spacer,
}

impl fmt::Display for DisplayBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayBlock::Heading { text } => write!(f, "{}", text),
            DisplayBlock::LabeledBullet { label, body } => write!(f, "• {}: {}", label, body),
            DisplayBlock::Plain { text } => write!(f, "{}", text),
            DisplayBlock::Spacer => Ok(()),
        }
    }
}

/// Render a template into display blocks, one block per line, in order.
pub fn render(template: &str) -> Vec<DisplayBlock> {
    template.split('\n').map(render_line).collect()
}

/// Classify a single template line. A trailing `\r` is ignored.
pub fn render_line(line: &str) -> DisplayBlock {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if let Some(block) = labeled_bullet(line) {
        return block;
    }
    if let Some(block) = heading(line) {
        return block;
    }
    if line.trim().is_empty() {
        return DisplayBlock::Spacer;
    }
    DisplayBlock::Plain {
        text: line.to_string(),
    }
}

fn labeled_bullet(line: &str) -> Option<DisplayBlock> {
    if !line.starts_with(BULLET_LABEL_OPEN) {
        return None;
    }
    // The close marker may overlap the opening one (`• **:x`): empty label.
    let close = line.find(LABEL_CLOSE)?;
    let label = line.get(BULLET_LABEL_OPEN.len()..close).unwrap_or_default();
    let body = &line[close + LABEL_CLOSE.len()..];
    Some(DisplayBlock::LabeledBullet {
        label: label.to_string(),
        body: body.trim_start().to_string(),
    })
}

fn heading(line: &str) -> Option<DisplayBlock> {
    let inner = line.strip_prefix(BOLD)?.strip_suffix(BOLD)?;
    if inner.contains(BOLD) || inner.trim().is_empty() {
        return None;
    }
    Some(DisplayBlock::Heading {
        text: inner.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryTable, GENERAL_TEMPLATE, GREETING_TEMPLATE};

    fn heading_block(text: &str) -> DisplayBlock {
        DisplayBlock::Heading {
            text: text.to_string(),
        }
    }

    fn bullet(label: &str, body: &str) -> DisplayBlock {
        DisplayBlock::LabeledBullet {
            label: label.to_string(),
            body: body.to_string(),
        }
    }

    fn plain(text: &str) -> DisplayBlock {
        DisplayBlock::Plain {
            text: text.to_string(),
        }
    }

    // ---- Golden fixtures ----

    #[test]
    fn test_labeled_bullet_golden() {
        assert_eq!(render("• **Power**: 240V"), vec![bullet("Power", "240V")]);
    }

    #[test]
    fn test_heading_golden() {
        assert_eq!(render("**Status**"), vec![heading_block("Status")]);
    }

    // ---- Labeled bullets ----

    #[test]
    fn test_bullet_body_keeps_later_markers() {
        assert_eq!(
            render_line("• **Tip**: see **Setup**: step 2"),
            bullet("Tip", "see **Setup**: step 2")
        );
    }

    #[test]
    fn test_bullet_with_empty_body() {
        assert_eq!(render_line("• **Lost Card?**:"), bullet("Lost Card?", ""));
    }

    #[test]
    fn test_overlapping_close_marker_gives_empty_label() {
        assert_eq!(render_line("• **:x"), bullet("", "x"));
        assert_eq!(render_line("• **: spaced"), bullet("", "spaced"));
    }

    #[test]
    fn test_bullet_without_label_close_is_plain() {
        assert_eq!(render_line("• **Bold** only"), plain("• **Bold** only"));
    }

    #[test]
    fn test_plain_bullet_without_bold_is_plain() {
        assert_eq!(
            render_line("• IP65 weatherproof rating"),
            plain("• IP65 weatherproof rating")
        );
    }

    // ---- Headings ----

    #[test]
    fn test_heading_with_trailing_colon_inside_markers() {
        assert_eq!(render_line("**AC Models:**"), heading_block("AC Models:"));
    }

    #[test]
    fn test_bold_label_with_text_after_is_plain() {
        let line = "**Dimensions**: 320mm x 180mm x 95mm";
        assert_eq!(render_line(line), plain(line));
    }

    #[test]
    fn test_bold_with_trailing_emoji_is_plain() {
        let line = "**Current System Status** ✅";
        assert_eq!(render_line(line), plain(line));
    }

    #[test]
    fn test_two_bold_runs_is_plain() {
        let line = "**Green** and **Red**";
        assert_eq!(render_line(line), plain(line));
    }

    #[test]
    fn test_bare_markers_are_plain() {
        assert_eq!(render_line("**"), plain("**"));
        assert_eq!(render_line("****"), plain("****"));
        assert_eq!(render_line("**   **"), plain("**   **"));
    }

    // ---- Plain and spacer ----

    #[test]
    fn test_numbered_step_is_plain_verbatim() {
        let line = "1. **Electrical Connection**: Connect to dedicated circuit breaker";
        assert_eq!(render_line(line), plain(line));
    }

    #[test]
    fn test_blank_lines_are_spacers() {
        assert_eq!(render_line(""), DisplayBlock::Spacer);
        assert_eq!(render_line("   \t"), DisplayBlock::Spacer);
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            render("**Status**\r\n• **Power**: 240V\r\n"),
            vec![
                heading_block("Status"),
                bullet("Power", "240V"),
                DisplayBlock::Spacer
            ]
        );
    }

    // ---- Sequence properties ----

    #[test]
    fn test_order_and_count_preserved() {
        let template = "Intro line\n\n**Section**\n• **A**: one\n• **B**: two\n\nOutro";
        let blocks = render(template);
        assert_eq!(
            blocks,
            vec![
                plain("Intro line"),
                DisplayBlock::Spacer,
                heading_block("Section"),
                bullet("A", "one"),
                bullet("B", "two"),
                DisplayBlock::Spacer,
                plain("Outro"),
            ]
        );
    }

    #[test]
    fn test_builtin_templates_one_block_per_line() {
        let table = CategoryTable::builtin();
        let templates = table
            .categories()
            .iter()
            .map(|c| c.template)
            .chain([GENERAL_TEMPLATE, GREETING_TEMPLATE]);

        for template in templates {
            let blocks = render(template);
            assert_eq!(blocks.len(), template.split('\n').count());
            assert_eq!(blocks, render(template));
            assert!(!matches!(blocks.last(), Some(DisplayBlock::Spacer)));
        }
    }

    #[test]
    fn test_general_template_structure() {
        let blocks = render(GENERAL_TEMPLATE);
        assert!(matches!(blocks[0], DisplayBlock::Plain { .. }));
        assert_eq!(blocks[1], DisplayBlock::Spacer);
        assert_eq!(blocks[2], heading_block("I can help you with:"));
        assert_eq!(
            blocks[3],
            bullet("Product Information", "Specifications, models, and features")
        );
    }

    #[test]
    fn test_greeting_is_single_plain_block() {
        let blocks = render(GREETING_TEMPLATE);
        assert_eq!(blocks.len(), 1);
        assert!(matches!(&blocks[0], DisplayBlock::Plain { text } if text.starts_with("Hello!")));
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(bullet("Power", "240V").to_string(), "• Power: 240V");
        assert_eq!(heading_block("Status").to_string(), "Status");
        assert_eq!(DisplayBlock::Spacer.to_string(), "");
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&bullet("Power", "240V")).unwrap();
        assert_eq!(json, r#"{"kind":"labeled_bullet","label":"Power","body":"240V"}"#);
        let json = serde_json::to_string(&DisplayBlock::Spacer).unwrap();
        assert_eq!(json, r#"{"kind":"spacer"}"#);
    }
}
