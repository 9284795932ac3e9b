//! ChatController -- runs one chat turn from submission to transcript.
//!
//! A turn is split in two so that callers can release the session lock
//! while the response streams:
//!
//! 1. [`ChatController::start_turn`] validates the session, appends the
//!    user message, selects context, and opens the completion stream.
//! 2. The caller drives [`ActiveTurn::next_frame`] to render progress, then
//!    hands the session back to [`ActiveTurn::finish`], which appends the
//!    assistant message (or nothing, on failure).
//!
//! The session's busy flag is held by the `ActiveTurn` from step 1 until it
//! is finished or dropped.

use std::sync::{Arc, Mutex};

use futures_util::StreamExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info_span, warn};

use cstore_types::chat::ChatMessage;
use cstore_types::error::ChatError;
use cstore_types::llm::{CompletionRequest, LlmError, StopReason, StreamEvent, Usage};

use super::session::{BusyGuard, ChatSession};
use super::{MISSING_CREDENTIAL_NOTICE, STREAM_CURSOR, catalog_unavailable_text, failure_text};
use crate::catalog::{CatalogCache, CatalogSource};
use crate::context::{ContextSelector, build_system_instruction};
use crate::llm::{CompletionClient, StreamInSpan};

/// Orchestrates chat turns against a catalog and a completion backend.
///
/// Shared across sessions; holds no per-session state.
pub struct ChatController<S> {
    catalog: Arc<CatalogCache<S>>,
    client: Arc<dyn CompletionClient>,
    selector: ContextSelector,
    rng: Mutex<StdRng>,
}

impl<S: CatalogSource> ChatController<S> {
    pub fn new(catalog: Arc<CatalogCache<S>>, client: Arc<dyn CompletionClient>) -> Self {
        Self::with_rng(catalog, client, StdRng::from_os_rng())
    }

    /// Construct with a fixed random source for the sampling fallback.
    pub fn with_rng(
        catalog: Arc<CatalogCache<S>>,
        client: Arc<dyn CompletionClient>,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog,
            client,
            selector: ContextSelector::default(),
            rng: Mutex::new(rng),
        }
    }

    pub fn catalog(&self) -> &Arc<CatalogCache<S>> {
        &self.catalog
    }

    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    /// Begin a turn for `input`.
    ///
    /// Errors leave the session as follows:
    /// - `Busy`: untouched.
    /// - `MissingCredential`, `CatalogUnavailable`: the user message and one
    ///   error-kind assistant message are appended. The client is not called.
    pub async fn start_turn(
        &self,
        session: &mut ChatSession,
        input: &str,
    ) -> Result<ActiveTurn, ChatError> {
        let guard = session.try_acquire_busy().ok_or(ChatError::Busy)?;

        session.push(ChatMessage::user(input));

        let Some(api_key) = session.credential().cloned() else {
            debug!("chat turn refused: no credential");
            session.push(ChatMessage::assistant_error(MISSING_CREDENTIAL_NOTICE));
            return Err(ChatError::MissingCredential);
        };

        let catalog = match self.catalog.get().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "chat turn ended: catalog unavailable");
                session.push(ChatMessage::assistant_error(catalog_unavailable_text(&e)));
                return Err(e.into());
            }
        };

        let selection = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            self.selector.select(input, catalog.products(), &mut *rng)
        };
        session.record_keyword(&selection.key);

        debug!(
            key = %selection.key,
            strategy = ?selection.strategy,
            context_products = selection.products.len(),
            "context selected"
        );

        let request = CompletionRequest::chat(
            build_system_instruction(&selection.products),
            session.llm_transcript(),
        );

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.system = self.client.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.stream = true,
            cstore.context.products = selection.products.len(),
        );

        let stream = self.client.stream(request, &api_key);

        Ok(ActiveTurn {
            stream: StreamInSpan::new(stream, span),
            buffer: String::new(),
            progress: Progress::Streaming,
            usage: None,
            stop_reason: None,
            _guard: guard,
        })
    }

    /// Run a whole turn, calling `on_frame` for every frame.
    ///
    /// Convenience for callers that can hold `&mut ChatSession` for the
    /// duration of the stream (the CLI).
    pub async fn submit<F>(
        &self,
        session: &mut ChatSession,
        input: &str,
        mut on_frame: F,
    ) -> Result<TurnOutcome, ChatError>
    where
        F: FnMut(&TurnFrame),
    {
        let mut turn = self.start_turn(session, input).await?;
        while let Some(frame) = turn.next_frame().await {
            on_frame(&frame);
        }
        let outcome = turn.finish(session).await;
        if let TurnOutcome::Completed { content, .. } = &outcome {
            on_frame(&TurnFrame {
                text: content.clone(),
                is_final: true,
            });
        }
        Ok(outcome)
    }
}

/// One rendering of the response in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnFrame {
    /// Accumulated text, with a trailing cursor unless `is_final`.
    pub text: String,
    pub is_final: bool,
}

#[derive(Debug)]
enum Progress {
    Streaming,
    Exhausted,
    Failed(LlmError),
}

/// An in-flight completion for one session.
pub struct ActiveTurn {
    stream: StreamInSpan,
    buffer: String,
    progress: Progress,
    usage: Option<Usage>,
    stop_reason: Option<StopReason>,
    _guard: BusyGuard,
}

impl ActiveTurn {
    /// Wait for the next text fragment and return the updated frame.
    ///
    /// Returns `None` once the stream is exhausted or has failed.
    pub async fn next_frame(&mut self) -> Option<TurnFrame> {
        if !matches!(self.progress, Progress::Streaming) {
            return None;
        }

        while let Some(event) = self.stream.next().await {
            match event {
                Ok(StreamEvent::TextDelta { text }) => {
                    if text.is_empty() {
                        continue;
                    }
                    self.buffer.push_str(&text);
                    let mut framed = String::with_capacity(self.buffer.len() + 3);
                    framed.push_str(&self.buffer);
                    framed.push(STREAM_CURSOR);
                    return Some(TurnFrame {
                        text: framed,
                        is_final: false,
                    });
                }
                Ok(StreamEvent::MessageDelta { stop_reason }) => {
                    self.stop_reason = Some(stop_reason);
                }
                Ok(StreamEvent::Usage(usage)) => {
                    self.usage = Some(usage);
                }
                Ok(StreamEvent::Connected) => {}
                Ok(StreamEvent::Done) => break,
                Err(e) => {
                    warn!(error = %e, partial_len = self.buffer.len(), "completion stream failed");
                    self.progress = Progress::Failed(e);
                    return None;
                }
            }
        }

        self.progress = Progress::Exhausted;
        None
    }

    /// Text accumulated so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Drain any remaining events and commit the turn to `session`.
    ///
    /// On success exactly one assistant message is appended. On failure
    /// nothing is appended. The busy flag is released either way.
    pub async fn finish(mut self, session: &mut ChatSession) -> TurnOutcome {
        while self.next_frame().await.is_some() {}

        match self.progress {
            Progress::Failed(error) => TurnOutcome::Failed {
                error,
                partial: self.buffer,
            },
            Progress::Streaming | Progress::Exhausted => {
                debug!(
                    chars = self.buffer.chars().count(),
                    stop_reason = ?self.stop_reason,
                    "assistant response complete"
                );
                session.push(ChatMessage::assistant(self.buffer.clone()));
                TurnOutcome::Completed {
                    content: self.buffer,
                    usage: self.usage,
                    stop_reason: self.stop_reason,
                }
            }
        }
    }
}

/// Result of a turn that reached the completion backend.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    Completed {
        content: String,
        usage: Option<Usage>,
        stop_reason: Option<StopReason>,
    },
    Failed {
        error: LlmError,
        /// Text received before the failure; never added to the transcript.
        partial: String,
    },
}

impl TurnOutcome {
    /// What the user sees as the final output of this turn.
    pub fn display_text(&self) -> String {
        match self {
            TurnOutcome::Completed { content, .. } => content.clone(),
            TurnOutcome::Failed { error, .. } => failure_text(error),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TurnOutcome::Completed { .. })
    }
}
