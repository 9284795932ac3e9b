//! Slash command parsing for the chat loop.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the transcript and the screen.
    Clear,
    /// Replace the API key.
    Key(String),
    /// Show the transcript so far.
    History,
    /// Show recently matched search keywords.
    Recent,
    /// Exit the chat session.
    Exit,
    /// Unknown command or missing argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(' ') {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/key" if arg.is_empty() => ChatCommand::Unknown("/key requires an API key".to_string()),
        "/key" => ChatCommand::Key(arg.to_string()),
        "/history" => ChatCommand::History,
        "/recent" => ChatCommand::Recent,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the conversation"),
        ("/key <KEY>", "Set the Groq API key for this session"),
        ("/history", "Show the conversation so far"),
        ("/recent", "Show recent search keywords"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, help) in rows {
        println!("  {:<12} {}", style(cmd).cyan(), help);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse("막걸리 안주 추천"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("  /CLEAR "), Some(ChatCommand::Clear));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
        assert_eq!(parse("/recent"), Some(ChatCommand::Recent));
    }

    #[test]
    fn test_key_requires_argument() {
        assert_eq!(
            parse("/key  gsk_abc "),
            Some(ChatCommand::Key("gsk_abc".to_string()))
        );
        assert!(matches!(parse("/key"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("/bogus arg"),
            Some(ChatCommand::Unknown("/bogus".to_string()))
        );
    }
}
