//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};

use cstore_types::error::{CatalogError, ChatError};

use super::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// No session with the given id.
    SessionNotFound,
    /// A response is already streaming for the session.
    Busy,
    /// The product catalog could not be loaded.
    CatalogUnavailable(CatalogError),
    Validation(String),
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::CatalogUnavailable(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Busy => AppError::Busy,
            ChatError::CatalogUnavailable(e) => AppError::CatalogUnavailable(e),
            ChatError::MissingCredential => {
                AppError::Validation(ChatError::MissingCredential.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::SessionNotFound => ("SESSION_NOT_FOUND", "Session not found".to_string()),
            AppError::Busy => (
                "SESSION_BUSY",
                "A response is still streaming for this session".to_string(),
            ),
            AppError::CatalogUnavailable(e) => ("CATALOG_UNAVAILABLE", e.to_string()),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
        };

        if matches!(self, AppError::CatalogUnavailable(_)) {
            tracing::warn!(code, %message, "request failed");
        }

        ApiResponse::error(code, &message, String::new()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_chat_error_conversion() {
        assert!(matches!(AppError::from(ChatError::Busy), AppError::Busy));
        assert!(matches!(
            AppError::from(ChatError::CatalogUnavailable(CatalogError::NotFound(
                "x.csv".to_string()
            ))),
            AppError::CatalogUnavailable(_)
        ));
        assert!(matches!(
            AppError::from(ChatError::MissingCredential),
            AppError::Validation(msg) if msg.contains("API key")
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::SessionNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::Busy.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::CatalogUnavailable(CatalogError::Io("denied".to_string()))
                .into_response()
                .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
