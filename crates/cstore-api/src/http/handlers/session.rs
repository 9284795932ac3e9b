//! Session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions                 - Start a session
//! - DELETE /api/v1/sessions/{id}            - End a session
//! - PUT    /api/v1/sessions/{id}/credential - Set the session API key
//! - DELETE /api/v1/sessions/{id}/credential - Forget the session API key
//! - GET    /api/v1/sessions/{id}/messages   - Transcript
//! - GET    /api/v1/sessions/{id}/dashboard  - Rendered dashboard view

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cstore_core::dashboard::{DashboardView, SessionView, render_dashboard};
use cstore_types::chat::{ChatMessage, ChatState};

use super::{find_session, parse_uuid};
use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

/// POST /api/v1/sessions
pub async fn create_session(State(state): State<AppState>) -> Json<ApiResponse<SessionCreated>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = state.sessions.create().await;
    tracing::info!(%session_id, "session created");

    let elapsed = start.elapsed().as_millis() as u64;
    let base = format!("/api/v1/sessions/{session_id}");
    Json(
        ApiResponse::success(SessionCreated { session_id }, request_id, elapsed)
            .with_link("messages", &format!("{base}/messages"))
            .with_link("dashboard", &format!("{base}/dashboard"))
            .with_link("chat", &format!("{base}/chat/stream")),
    )
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = parse_uuid(&id)?;
    if !state.sessions.remove(&session_id).await {
        return Err(AppError::SessionNotFound);
    }
    tracing::info!(%session_id, "session ended");

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "deleted": true }),
        request_id,
        elapsed,
    )))
}

#[derive(Debug, Deserialize)]
pub struct SetCredentialRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct CredentialStatusBody {
    pub configured: bool,
    pub state: ChatState,
}

/// PUT /api/v1/sessions/{id}/credential
///
/// A blank key leaves the session without a credential.
pub async fn set_credential(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SetCredentialRequest>,
) -> Result<Json<ApiResponse<CredentialStatusBody>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let (_, shared) = find_session(&state, &id).await?;
    let mut session = shared.lock().await;
    let configured = session.set_credential(&body.api_key);
    let status = CredentialStatusBody {
        configured,
        state: session.state(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(status, request_id, elapsed)))
}

/// DELETE /api/v1/sessions/{id}/credential
pub async fn clear_credential(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CredentialStatusBody>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let (_, shared) = find_session(&state, &id).await?;
    let mut session = shared.lock().await;
    session.clear_credential();
    let status = CredentialStatusBody {
        configured: false,
        state: session.state(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(status, request_id, elapsed)))
}

#[derive(Debug, Serialize)]
pub struct MessagesBody {
    pub state: ChatState,
    pub messages: Vec<ChatMessage>,
}

/// GET /api/v1/sessions/{id}/messages
pub async fn get_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessagesBody>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let (_, shared) = find_session(&state, &id).await?;
    let body = {
        let session = shared.lock().await;
        MessagesBody {
            state: session.state(),
            messages: session.messages().to_vec(),
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(
        ApiResponse::success(body, request_id, elapsed)
            .with_link("self", &format!("/api/v1/sessions/{id}/messages")),
    ))
}

/// GET /api/v1/sessions/{id}/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let (_, shared) = find_session(&state, &id).await?;
    let view = SessionView::from(&*shared.lock().await);
    let summary = state.catalog().summary().await;
    let dashboard = render_dashboard(summary.as_ref(), &view);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(
        ApiResponse::success(dashboard, request_id, elapsed)
            .with_link("self", &format!("/api/v1/sessions/{id}/dashboard")),
    ))
}
