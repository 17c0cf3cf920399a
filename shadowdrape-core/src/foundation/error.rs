/// Convenience result type used across shadowdrape.
pub type ShadeResult<T> = Result<T, ShadeError>;

/// Top-level error taxonomy for the edges of the engine (buffers, decoding, config).
///
/// The render path itself never returns these for parameter values; degenerate
/// parameters are clamped or produce empty layers instead.
#[derive(thiserror::Error, Debug)]
pub enum ShadeError {
    /// Invalid caller-provided data (buffer sizes, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal inconsistency while evaluating a render stage.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors while decoding encoded image bytes.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShadeError {
    /// Build a [`ShadeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShadeError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ShadeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ShadeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Failure reported by an upstream inference collaborator (segmentation or depth).
///
/// The engine never propagates these; a failed slot simply means the feature is unavailable.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// The model ran and failed.
    #[error("inference failed: {0}")]
    Failed(String),

    /// The request was superseded or aborted before it resolved.
    #[error("inference cancelled")]
    Cancelled,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
