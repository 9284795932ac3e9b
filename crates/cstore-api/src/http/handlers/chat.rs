//! SSE streaming chat endpoint.
//!
//! POST /api/v1/sessions/{id}/chat/stream
//!
//! The session lock is held only while the turn starts and while it is
//! finished; the response streams with the lock released so the transcript
//! and dashboard stay readable mid-turn.
//!
//! SSE event types:
//! - `frame`  - current rendering: `{ "text": "...", "final": bool }`
//! - `notice` - the turn was answered with an inline error message: `{ "message": "..." }`
//! - `error`  - the completion failed: `{ "message": "..." }`
//! - `done`   - stream complete: `{}`

use std::convert::Infallible;
use std::time::Duration;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::Stream;
use serde::Deserialize;

use cstore_core::chat::{ActiveTurn, TurnOutcome, failure_text};
use cstore_types::error::ChatError;

use super::find_session;
use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StreamChatRequest {
    pub message: String,
}

/// How a turn began.
enum TurnStart {
    Streaming(ActiveTurn),
    /// Rejected before reaching the model; the notice is already in the
    /// transcript.
    Notice(String),
}

fn sse_event(name: &str, data: serde_json::Value) -> Event {
    Event::default().event(name).data(data.to_string())
}

/// POST /api/v1/sessions/{id}/chat/stream
pub async fn stream_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StreamChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let (session_id, shared) = find_session(&state, &id).await?;

    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let start = {
        let mut session = shared.lock().await;
        match state.controller.start_turn(&mut session, message).await {
            Ok(turn) => TurnStart::Streaming(turn),
            Err(ChatError::Busy) => return Err(AppError::Busy),
            Err(e @ (ChatError::MissingCredential | ChatError::CatalogUnavailable(_))) => {
                tracing::debug!(%session_id, reason = %e, "turn answered with notice");
                let notice = session
                    .messages()
                    .last()
                    .map(|m| m.content.clone())
                    .unwrap_or_else(|| e.to_string());
                TurnStart::Notice(notice)
            }
        }
    };

    let stream = async_stream::stream! {
        match start {
            TurnStart::Notice(message) => {
                yield Ok::<_, Infallible>(sse_event(
                    "notice",
                    serde_json::json!({ "message": message }),
                ));
            }
            TurnStart::Streaming(mut turn) => {
                while let Some(frame) = turn.next_frame().await {
                    yield Ok(sse_event(
                        "frame",
                        serde_json::json!({ "text": frame.text, "final": false }),
                    ));
                }

                let outcome = {
                    let mut session = shared.lock().await;
                    turn.finish(&mut session).await
                };
                match outcome {
                    TurnOutcome::Completed { content, .. } => {
                        yield Ok(sse_event(
                            "frame",
                            serde_json::json!({ "text": content, "final": true }),
                        ));
                    }
                    TurnOutcome::Failed { error, .. } => {
                        tracing::warn!(%session_id, error = %error, "completion stream failed");
                        yield Ok(sse_event(
                            "error",
                            serde_json::json!({ "message": failure_text(&error) }),
                        ));
                    }
                }
            }
        }

        yield Ok(sse_event("done", serde_json::json!({})));
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}
