//! CompletionClient trait definition.
//!
//! The one abstraction the chat controller needs from a model backend:
//! send a request with a caller-supplied credential and get back a stream
//! of events. Implementations live in cstore-infra.

use std::pin::Pin;

use futures_util::Stream;
use secrecy::SecretString;

use cstore_types::llm::{CompletionRequest, LlmError, StreamEvent};

/// Boxed event stream returned by [`CompletionClient::stream`].
pub type CompletionStream =
    Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for OpenAI-compatible chat completion backends.
///
/// Object-safe so the controller can hold `Arc<dyn CompletionClient>` and
/// tests can substitute a scripted client. The credential is passed per
/// call because it belongs to the session, not to the client.
pub trait CompletionClient: Send + Sync {
    /// Provider name for logs and spans (e.g. "groq").
    fn name(&self) -> &str;

    /// Send a streaming completion request.
    ///
    /// Transport and authentication failures surface as `Err` items on the
    /// returned stream, never as a panic.
    fn stream(&self, request: CompletionRequest, api_key: &SecretString) -> CompletionStream;
}
