//! Main chat loop orchestration.
//!
//! Obtains the API key, prints the banner, then alternates between reading
//! a line and either running a slash command or streaming a turn.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use cstore_core::chat::{
    ChatSession, MISSING_CREDENTIAL_NOTICE, TurnOutcome, catalog_unavailable_text,
};
use cstore_core::dashboard::{SessionView, render_dashboard};
use cstore_types::error::ChatError;
use cstore_types::llm::DEFAULT_MODEL;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ChatRenderer, FramePrinter};

/// Ask for the API key with masked input. Blank input leaves it unset.
fn prompt_api_key() -> anyhow::Result<Option<String>> {
    if !std::io::stdin().is_terminal() {
        return Ok(None);
    }
    let key: String = dialoguer::Password::new()
        .with_prompt("Groq API Key (Enter to skip)")
        .allow_empty_password(true)
        .interact()?;
    Ok(Some(key))
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message("행사 정보를 찾는 중...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState, api_key: Option<String>) -> anyhow::Result<()> {
    let mut session = ChatSession::new();

    let api_key = match api_key {
        Some(key) => Some(key),
        None => prompt_api_key()?,
    };
    if let Some(key) = api_key {
        session.set_credential(&key);
    }

    let summary = state.catalog().summary().await;
    let view = render_dashboard(summary.as_ref(), &SessionView::from(&session));
    print_welcome_banner(&view, DEFAULT_MODEL);

    let renderer = ChatRenderer::new();
    let (mut input, _writer) = ChatInput::new("you › ")?;

    loop {
        let line = match input.read_line().await {
            InputEvent::Message(line) => line,
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("  {}", style("(Ctrl+D or /exit to quit)").dim());
                continue;
            }
        };

        if let Some(command) = commands::parse(&line) {
            match command {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => {
                    session.clear_transcript();
                    input.clear();
                }
                ChatCommand::Key(key) => {
                    if session.set_credential(&key) {
                        println!("  {}", style("API Key 설정 완료!").green());
                    } else {
                        println!("  {}", style("API key must not be blank").yellow());
                    }
                }
                ChatCommand::History => {
                    println!();
                    for message in session.messages() {
                        renderer.print_message(message);
                    }
                }
                ChatCommand::Recent => {
                    let recent: Vec<&str> = session.recent_keywords().collect();
                    if recent.is_empty() {
                        println!("  {}", style("No searches yet.").dim());
                    } else {
                        println!("  {}", recent.join(", "));
                    }
                }
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::Unknown(name) => {
                    println!(
                        "  {} {} (type /help)",
                        style("Unknown command:").yellow(),
                        name
                    );
                }
            }
            continue;
        }

        run_turn(state, &renderer, &mut session, &line).await;
    }

    Ok(())
}

/// Stream one turn to the terminal.
async fn run_turn(
    state: &AppState,
    renderer: &ChatRenderer,
    session: &mut ChatSession,
    line: &str,
) {
    let started = Instant::now();
    let spinner = thinking_spinner();
    let mut printer = FramePrinter::new();

    println!();
    let result = state
        .controller
        .submit(session, line, |frame| {
            if !printer.started() {
                spinner.finish_and_clear();
                print!("  ");
            }
            printer.print(frame);
        })
        .await;
    spinner.finish_and_clear();
    let elapsed = started.elapsed().as_millis() as u64;

    match result {
        Ok(TurnOutcome::Completed { usage, .. }) => {
            println!();
            let tokens = usage.map(|u| u.input_tokens + u.output_tokens);
            renderer.print_stats_footer(tokens, elapsed, DEFAULT_MODEL);
        }
        Ok(outcome @ TurnOutcome::Failed { .. }) => {
            if printer.started() {
                println!();
            }
            println!("  {}", style(outcome.display_text()).red());
        }
        Err(ChatError::MissingCredential) => {
            println!("  {}", style(MISSING_CREDENTIAL_NOTICE).yellow());
            println!("  {}", style("Set one with /key <API_KEY>").dim());
        }
        Err(ChatError::CatalogUnavailable(e)) => {
            println!("  {}", style(catalog_unavailable_text(&e)).red());
        }
        Err(e) => {
            tracing::warn!(error = %e, "turn rejected");
            println!("  {}", style(e).red());
        }
    }
    println!();
}
