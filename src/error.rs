use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Authentication error: no API key resolvable")]
    Auth,
    #[error("Rate limit error: {0}")]
    RateLimit(String),
    #[error("Empty result error: {0}")]
    EmptyResult(String),
    #[error("Timeout error: {0}")]
    Timeout(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Remote error: {0}")]
    Remote(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeminiError {
    /// Rate-limit errors are the only kind the retry policy replays.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, GeminiError::RateLimit(_))
    }
}

pub type Result<T> = std::result::Result<T, GeminiError>;
