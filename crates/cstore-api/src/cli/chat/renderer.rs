//! Terminal output for chat responses.
//!
//! While a response streams, only the newly arrived text of each frame is
//! printed. Finished answers replayed from the transcript are rendered as
//! markdown through `termimad`.

use std::io::Write;

use console::style;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use cstore_core::chat::{STREAM_CURSOR, TurnFrame};
use cstore_types::chat::{ChatMessage, ChatRole};

pub struct ChatRenderer {
    skin: MadSkin,
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render a complete markdown response.
    pub fn render_final(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print one transcript entry, as in `/history`.
    pub fn print_message(&self, message: &ChatMessage) {
        match (message.role, message.is_error()) {
            (ChatRole::User, _) => {
                println!("  {} {}", style("you ›").green().bold(), message.content);
            }
            (ChatRole::Assistant, true) => {
                println!("  {}", style(&message.content).red());
            }
            (ChatRole::Assistant, false) => {
                print!("{}", self.render_final(&message.content));
            }
        }
        println!();
    }

    /// Print the stats footer after a response.
    pub fn print_stats_footer(&self, tokens: Option<u32>, response_ms: u64, model: &str) {
        let seconds = response_ms as f64 / 1000.0;
        let tokens = tokens.map_or_else(|| "?".to_string(), |t| t.to_string());
        println!(
            "\n  {} {} tokens {} {:.1}s {} {}",
            style("|").dim(),
            style(tokens).dim(),
            style("\u{00b7}").dim(),
            style(seconds).dim(),
            style("\u{00b7}").dim(),
            style(model).dim(),
        );
    }
}

/// Prints streaming frames incrementally.
///
/// Frames carry the whole response so far; this keeps track of how much
/// has already reached the terminal and writes only the rest.
#[derive(Debug, Default)]
pub struct FramePrinter {
    printed: usize,
}

impl FramePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The part of `frame` not yet printed, without the cursor.
    pub fn pending<'a>(&self, frame: &'a TurnFrame) -> &'a str {
        let text = if frame.is_final {
            frame.text.as_str()
        } else {
            frame.text.strip_suffix(STREAM_CURSOR).unwrap_or(&frame.text)
        };
        text.get(self.printed..).unwrap_or("")
    }

    pub fn print(&mut self, frame: &TurnFrame) {
        let pending = self.pending(frame);
        if pending.is_empty() {
            return;
        }
        print!("{pending}");
        let _ = std::io::stdout().flush();
        self.printed += pending.len();
    }

    /// Whether anything has been printed yet.
    pub fn started(&self) -> bool {
        self.printed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(text: &str, is_final: bool) -> TurnFrame {
        TurnFrame {
            text: text.to_string(),
            is_final,
        }
    }

    #[test]
    fn test_pending_strips_cursor_and_printed_prefix() {
        let mut printer = FramePrinter::new();
        assert_eq!(printer.pending(&frame("안녕▌", false)), "안녕");

        printer.printed = "안녕".len();
        assert_eq!(printer.pending(&frame("안녕하세요▌", false)), "하세요");
        assert_eq!(printer.pending(&frame("안녕하세요", true)), "하세요");
    }

    #[test]
    fn test_final_frame_after_full_stream_prints_nothing() {
        let mut printer = FramePrinter::new();
        printer.printed = "안녕하세요".len();
        assert_eq!(printer.pending(&frame("안녕하세요", true)), "");
        assert!(printer.started());
    }

    #[test]
    fn test_final_text_keeps_trailing_cursor_character() {
        let printer = FramePrinter::new();
        assert_eq!(printer.pending(&frame("a▌", true)), "a▌");
    }
}
