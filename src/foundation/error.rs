/// Convenience result type used across reelquiz.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by the render job and its collaborators.
///
/// `Validation`, `Encode` and IO wrapped in `Other` are fatal to a render job.
/// `NotFound` and `Network` come from asset collaborators and are recovered by the
/// interpreter with a fallback. `Upload` is recorded on the outcome.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Malformed manifest or invalid builder input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A collaborator found no match for the query (no movie, no image, no voice).
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport or remote API failure.
    #[error("network error: {0}")]
    Network(String),

    /// Encoder process failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Post-render upload failure.
    #[error("upload error: {0}")]
    Upload(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`ReelError::Network`] value.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Build a [`ReelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ReelError::Upload`] value.
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors an asset collaborator may raise and the interpreter recovers from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Network(_))
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
