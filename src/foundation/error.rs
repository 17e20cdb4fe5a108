/// Convenience result type used across the renderer.
pub type ScrappersResult<T> = Result<T, ScrappersError>;

/// Top-level error taxonomy. Every variant is fatal to a render run.
#[derive(thiserror::Error, Debug)]
pub enum ScrappersError {
    /// Invalid render options (size, speed, worker count).
    #[error("configuration error: {0}")]
    Config(String),

    /// Replay content the renderer cannot draw.
    #[error("data error: {0}")]
    Data(String),

    /// Rasterization or pipeline failures.
    #[error("render error: {0}")]
    Render(String),

    /// Animation container encoding failures.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when deserializing replay data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrappersError {
    /// Build a [`ScrappersError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScrappersError::Data`] value.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`ScrappersError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScrappersError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ScrappersError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
