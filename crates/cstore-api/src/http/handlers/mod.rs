//! HTTP request handlers.

pub mod catalog;
pub mod chat;
pub mod session;

use uuid::Uuid;

use crate::http::error::AppError;
use crate::state::{AppState, SharedSession};

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// Look up a session by its path parameter.
async fn find_session(state: &AppState, id: &str) -> Result<(Uuid, SharedSession), AppError> {
    let id = parse_uuid(id)?;
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or(AppError::SessionNotFound)?;
    Ok((id, session))
}
