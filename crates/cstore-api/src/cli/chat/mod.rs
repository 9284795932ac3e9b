//! Interactive CLI chat with the deals assistant.
//!
//! Streams responses as they arrive, renders finished answers as markdown,
//! and handles slash commands. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
