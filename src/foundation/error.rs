/// Convenience result type used across the crate.
pub type SceneResult<T> = Result<T, SceneError>;

/// Error type for scene tracking, surface allocation, and rasterization.
///
/// None of these reach the reader of the page: every failure path degrades to the scene's
/// caption and fallback text. They exist so hosts can log and tests can assert.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Invalid geometry, options, or layout input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The drawing backend could not produce a surface.
    #[error("backend unavailable: {0}")]
    Backend(String),

    /// A scene failed while building its layer tree.
    #[error("scene setup error: {0}")]
    Setup(String),

    /// Rasterization or readback failed.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Backend`].
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`SceneError::Setup`].
    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    /// Build a [`SceneError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SceneError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
