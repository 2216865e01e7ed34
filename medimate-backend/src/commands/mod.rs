//! Chat command routing.
//!
//! Every message is classified on its own; there is no per-chat state.
//! `handle` is the only entry point transports need, and it always returns
//! reply text: errors are turned into user-safe messages here.

mod help;
mod notes;
mod search;
mod start;

use crate::context::AppContext;
use crate::error::{MedimateError, Result};

pub const UNRECOGNIZED_REPLY: &str =
    "Sorry, I don't recognize that command. Type /help for a list of commands.";
pub const PLAIN_TEXT_REPLY: &str =
    "I only understand commands. Type /help for a list of commands.";

/// A chat message as handed over by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Lowercased command without the leading `/` or `@botname` suffix.
    /// `None` for plain text.
    pub command_name: Option<String>,
    pub args: Vec<String>,
    pub raw_text: String,
}

impl InboundMessage {
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split_whitespace();
        let command_name = match text.trim_start().strip_prefix('/') {
            Some(_) => parts.next().map(|token| {
                let name = token.trim_start_matches('/');
                let name = name.split('@').next().unwrap_or(name);
                name.to_lowercase()
            }),
            None => None,
        };

        Self {
            command_name,
            args: parts.map(str::to_string).collect(),
            raw_text: text.to_string(),
        }
    }
}

/// What a message asks for
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// `/start`
    Start,
    /// `/help` or `/?`
    Help,
    /// `/search <name>`; the name may be empty
    Search(String),
    /// `/notes <topic>`; the topic may be empty
    Notes(String),
    /// Plain text treated as a medication name (implicit search only)
    FreeText(String),
    /// Plain text while implicit search is off
    PlainText,
    /// A `/command` we don't know
    Unrecognized(String),
}

/// Classify a message.
pub fn parse(message: &InboundMessage, implicit_search_enabled: bool) -> Command {
    let joined = message.args.join(" ");

    log::debug!(
        "[COMMANDS] Parsing {:?} -> command={:?}, {} args",
        message.raw_text,
        message.command_name,
        message.args.len()
    );

    match message.command_name.as_deref() {
        Some("start") => Command::Start,
        Some("help") | Some("?") => Command::Help,
        Some("search") => Command::Search(joined),
        Some("notes") => Command::Notes(joined),
        Some(other) => Command::Unrecognized(other.to_string()),
        None if implicit_search_enabled => Command::FreeText(message.raw_text.trim().to_string()),
        None => Command::PlainText,
    }
}

/// Execute a command and return the reply, or an error to be rendered.
pub fn execute(cmd: Command, ctx: &AppContext) -> Result<String> {
    match cmd {
        Command::Start => Ok(start::execute()),
        Command::Help => Ok(help::execute(ctx.config.implicit_search_enabled)),
        Command::Search(name) => search::execute(ctx, &name, search::SEARCH_PROMPT),
        Command::FreeText(text) => search::execute(ctx, &text, search::FREE_TEXT_PROMPT),
        Command::Notes(topic) => notes::execute(ctx, &topic),
        Command::PlainText => Ok(PLAIN_TEXT_REPLY.to_string()),
        Command::Unrecognized(name) => {
            log::debug!("[COMMANDS] Unknown command '/{}'", name);
            Ok(UNRECOGNIZED_REPLY.to_string())
        }
    }
}

/// Classify, execute, and render any failure as a reply.
pub fn handle_message(ctx: &AppContext, message: &InboundMessage) -> String {
    let cmd = parse(message, ctx.config.implicit_search_enabled);
    match execute(cmd, ctx) {
        Ok(reply) => reply,
        Err(e) => {
            match &e {
                MedimateError::Storage(_) | MedimateError::Ingestion(_) => {
                    log::error!("[COMMANDS] {:?} failed: {}", message.raw_text, e)
                }
                MedimateError::Validation(_) | MedimateError::NotFound(_) => {
                    log::debug!("[COMMANDS] {:?}: {}", message.raw_text, e)
                }
            }
            e.user_message()
        }
    }
}

/// Convenience wrapper for transports that only have the raw text.
pub fn handle(ctx: &AppContext, text: &str) -> String {
    handle_message(ctx, &InboundMessage::parse(text))
}
