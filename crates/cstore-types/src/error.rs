use thiserror::Error;

/// Errors from loading the product catalog.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {0}")]
    NotFound(String),

    #[error("catalog is missing required column '{0}'")]
    MissingColumn(String),

    #[error("catalog parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("catalog read error: {0}")]
    Io(String),
}

/// Reasons a chat turn was turned away before reaching the model.
///
/// A completion that fails mid-stream is not an error here; it finishes the
/// turn with a failure message in the transcript.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("no API key configured for this session")]
    MissingCredential,

    #[error("a response is still streaming for this session")]
    Busy,

    #[error("product catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),
}

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },
}
