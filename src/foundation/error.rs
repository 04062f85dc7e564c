/// Convenience result type used across poly2rle.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Top-level error taxonomy used by conversion APIs.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// Invalid input data or unmet run precondition (missing image size,
    /// missing video name, unknown config name).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed polygon geometry or mask encoding failure.
    #[error("rasterization error: {0}")]
    Rasterize(String),

    /// Errors when serializing or deserializing annotation data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConvertError {
    /// Build a [`ConvertError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ConvertError::Rasterize`] value.
    pub fn rasterize(msg: impl Into<String>) -> Self {
        Self::Rasterize(msg.into())
    }

    /// Build a [`ConvertError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
