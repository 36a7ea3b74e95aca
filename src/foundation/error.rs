/// Convenience result type used across the crate.
pub type CoverResult<T> = Result<T, CoverError>;

/// Top-level error taxonomy for composition, rendering and IO.
///
/// Export failures have their own classification in [`crate::ExportError`]; this type covers
/// everything that happens before or around an export.
#[derive(thiserror::Error, Debug)]
pub enum CoverError {
    /// Invalid user-provided parameters or documents.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image bytes that could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while building or rasterizing the rendered region.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing cover documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoverError {
    /// Build a [`CoverError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CoverError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CoverError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CoverError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
