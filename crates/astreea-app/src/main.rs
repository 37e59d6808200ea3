//! Astreea assistant binary - composition root.
//!
//! 1. Parse CLI arguments and start tracing on stderr at a provisional level
//! 2. Load configuration from TOML, then apply its log level
//! 3. Write the config (`--write-config`), answer one `--ask` question, or
//! 4. Run the interactive prompt on top of a chat session

mod cli;
mod display;
mod repl;

use std::time::Duration;

use astreea_chat::{
    render, CategoryId, ChatSession, DisplayBlock, IntentClassifier, SessionEvent, QUICK_ACTIONS,
};
use astreea_core::config::AstreeaConfig;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::cli::CliArgs;
use crate::repl::Command;

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// `RUST_LOG` when set, otherwise `level`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn init_tracing(level: &str) -> FilterHandle {
    let (filter, handle) = reload::Layer::new(env_filter(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    handle
}

fn blocks_json(category: CategoryId, blocks: &[DisplayBlock]) -> astreea_core::Result<String> {
    let out = serde_json::json!({
        "category": category,
        "blocks": blocks,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

/// Classify and print one question immediately.
fn ask_once(question: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if question.trim().is_empty() {
        return Err("question cannot be blank".into());
    }

    let result = IntentClassifier::default().classify(question);
    let blocks = render(result.template);
    tracing::debug!(category = %result.category, blocks = blocks.len(), "Answered --ask");

    if json {
        println!("{}", blocks_json(result.category, &blocks)?);
    } else {
        for block in &blocks {
            println!("{}", display::format_block(block));
        }
    }
    Ok(())
}

/// Print assistant output as it arrives on the session event stream.
async fn print_events(mut events: tokio::sync::broadcast::Receiver<SessionEvent>) {
    loop {
        match events.recv().await {
            Ok(SessionEvent::MessageAppended(message)) if !message.is_user() => {
                println!("{}\n", display::format_message(&message));
            }
            Ok(SessionEvent::ComposingChanged(true)) => println!("Assistant is typing..."),
            Ok(SessionEvent::Reset) => println!("--- conversation reset ---\n"),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Display fell behind; use /history to catch up");
            }
            Err(RecvError::Closed) => return,
        }
    }
}

fn print_quick_actions() {
    for (i, action) in QUICK_ACTIONS.iter().enumerate() {
        println!("  {}. {}", i + 1, action.text);
    }
}

async fn run_interactive(config: &AstreeaConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = ChatSession::new(&config.chat);

    for message in session.messages() {
        println!("{}\n", display::format_message(&message));
    }
    println!("Type /help for commands.\n");

    let printer = tokio::spawn(print_events(session.subscribe()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut quit = false;
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Say(text) => {
                session.submit(&text)?;
            }
            Command::ListQuickActions => print_quick_actions(),
            Command::QuickAction(n) => match n.checked_sub(1).and_then(|i| QUICK_ACTIONS.get(i)) {
                Some(action) => {
                    println!("You: {}", action.text);
                    session.quick_action(action)?;
                }
                None => println!("No quick action {}; try /quick", n),
            },
            Command::History => {
                for message in session.messages() {
                    println!("{}\n", display::format_message(&message));
                }
            }
            Command::Reset => session.reset()?,
            Command::Help => println!("{}", repl::HELP),
            Command::Quit => {
                quit = true;
                break;
            }
            Command::Unknown(cmd) => println!("Unknown command {}; try /help", cmd),
        }
    }

    // Piped input: let queued replies land before exiting.
    if !quit {
        session.idle().await;
    }

    drop(session);
    if tokio::time::timeout(Duration::from_secs(1), printer)
        .await
        .is_err()
    {
        tracing::debug!("Printer did not drain before exit");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let filter = init_tracing(args.log_level.as_deref().unwrap_or("info"));
    tracing::info!("Starting Astreea assistant v{}", env!("CARGO_PKG_VERSION"));

    let config_file = args.resolve_config_path();
    let config = AstreeaConfig::load_or_default(&config_file);
    let level = args.resolve_log_level(&config.general.log_level);
    if let Err(e) = filter.reload(env_filter(&level)) {
        tracing::warn!(level = %level, error = %e, "Could not apply configured log level");
    }

    if args.write_config {
        config.save(&config_file)?;
        println!("Wrote {}", config_file.display());
        return Ok(());
    }

    if let Some(question) = args.ask.as_deref() {
        return ask_once(question, args.json);
    }

    run_interactive(&config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_json_shape() {
        let blocks = render("**Status**\n• **Power**: 240V\n");
        let json = blocks_json(CategoryId::Specifications, &blocks).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["category"], "specifications");
        assert_eq!(value["blocks"][0]["kind"], "heading");
        assert_eq!(value["blocks"][1]["label"], "Power");
        assert_eq!(value["blocks"][2]["kind"], "spacer");
    }
}
