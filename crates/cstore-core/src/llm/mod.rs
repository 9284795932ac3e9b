//! Completion client port and stream instrumentation.

pub mod client;
pub mod span;

pub use client::{CompletionClient, CompletionStream};
pub use span::StreamInSpan;
