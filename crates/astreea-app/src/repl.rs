//! Line commands understood by the interactive prompt.

pub const HELP: &str = "\
Type a question about your charger and press Enter.
Commands:
  /quick        list quick actions
  /quick N      ask quick action N
  /history      show the whole conversation
  /reset        start over
  /help         show this help
  /quit         exit";

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    ListQuickActions,
    /// 1-based index as typed.
    QuickAction(usize),
    History,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Say(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("quick"), None, None) => Command::ListQuickActions,
            (Some("quick"), Some(n), None) => match n.parse::<usize>() {
                Ok(index) => Command::QuickAction(index),
                Err(_) => Command::Unknown(trimmed.to_string()),
            },
            (Some("history"), None, None) => Command::History,
            (Some("reset"), None, None) => Command::Reset,
            (Some("help"), None, None) => Command::Help,
            (Some("quit") | Some("exit"), None, None) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_say() {
        assert_eq!(
            Command::parse("why is it slow?"),
            Command::Say("why is it slow?".to_string())
        );
        // Blank lines pass through; the session ignores them.
        assert_eq!(Command::parse("   "), Command::Say("   ".to_string()));
    }

    #[test]
    fn test_commands() {
        assert_eq!(Command::parse("/quick"), Command::ListQuickActions);
        assert_eq!(Command::parse("/quick 2"), Command::QuickAction(2));
        assert_eq!(Command::parse("  /reset "), Command::Reset);
        assert_eq!(Command::parse("/history"), Command::History);
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("/exit"), Command::Quit);
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(
            Command::parse("/quick two"),
            Command::Unknown("/quick two".to_string())
        );
        assert_eq!(
            Command::parse("/reset now"),
            Command::Unknown("/reset now".to_string())
        );
        assert_eq!(Command::parse("/"), Command::Unknown("/".to_string()));
    }
}
