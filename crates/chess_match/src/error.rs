/// Errors surfaced by the match core.
///
/// Illegal moves are not errors; see [`crate::MoveOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
    #[error("invalid ruleset: {0}")]
    InvalidRuleset(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;

impl MatchError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        MatchError::MalformedSnapshot(reason.into())
    }
}
