//! Error taxonomy of the removal engine.

/// Errors surfaced by [`process`](crate::process) and friends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BgError {
    /// Nothing to work on yet; retry once an image has been loaded.
    #[error("not ready: {0}")]
    NotReady(String),

    /// Degenerate raster or malformed options. Not worth retrying.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A best-effort step failed. Policies swallow this after logging it.
    #[error("internal failure: {0}")]
    InternalFailure(String),
}

impl BgError {
    /// Whether the caller may retry the same call later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BgError::NotReady(_))
    }
}

pub type Result<T> = std::result::Result<T, BgError>;
