//! HTTP API layer for cstore.
//!
//! Axum-based API at `/api/v1/` with envelope responses, SSE chat
//! streaming and CORS support.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
