/// Convenience result type used across frame-maker.
pub type FrameResult<T> = Result<T, FrameError>;

#[derive(thiserror::Error, Debug)]
/// Top-level error type for frame-maker.
pub enum FrameError {
    /// Invalid input, unknown identifiers or mismatched controls.
    #[error("validation error: {0}")]
    Validation(String),

    /// Frame markup could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Frame source could not be retrieved.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Rasterization, decoding or export failed.
    #[error("render error: {0}")]
    Render(String),

    /// Catalog (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameError {
    /// Build a [`FrameError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameError::Parse`].
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`FrameError::Fetch`].
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`FrameError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FrameError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
