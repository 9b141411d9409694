/// Result type returned by fallible bokeh APIs.
pub type BokehResult<T> = Result<T, BokehError>;

/// Errors raised while configuring, rendering or exporting a bokeh mask.
#[derive(thiserror::Error, Debug)]
pub enum BokehError {
    /// Rejected shape parameters, canvas or tiling settings, or unreadable input paths.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating or assembling tiles.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Malformed bokeh node JSON.
    #[error("serialization error: {0}")]
    Serde(String),

    /// IO or image encoding failure, with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BokehError {
    /// Build a [`BokehError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BokehError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`BokehError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
