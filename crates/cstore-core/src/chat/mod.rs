//! Chat session state and the streaming turn controller.

pub mod controller;
pub mod session;

pub use controller::{ActiveTurn, ChatController, TurnFrame, TurnOutcome};
pub use session::{BusyGuard, ChatSession};

/// Marker appended to the in-progress buffer while a response streams.
pub const STREAM_CURSOR: char = '▌';

/// Notice appended when a submission arrives before an API key is set.
pub const MISSING_CREDENTIAL_NOTICE: &str = "Groq API Key를 먼저 설정해주세요!";

/// Visible text for a turn that failed while streaming.
pub fn failure_text(error: &impl std::fmt::Display) -> String {
    format!("오류가 발생했습니다: {error}")
}

/// Notice appended when the catalog cannot be loaded for a turn.
pub fn catalog_unavailable_text(error: &impl std::fmt::Display) -> String {
    format!("행사 데이터를 불러올 수 없습니다: {error}")
}
