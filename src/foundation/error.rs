use crate::camera::device::CameraError;

/// Convenience result type used across kropper.
pub type KropperResult<T> = Result<T, KropperError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum KropperError {
    /// Invalid caller-provided options, sizes or shape definitions.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image source could not be loaded or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A surface could not be exported to an encoded raster.
    #[error("encode error: {0}")]
    Encode(String),

    /// Surface allocation or drawing failed.
    #[error("render error: {0}")]
    Render(String),

    /// Media stream acquisition failed.
    #[error("camera error: {0}")]
    Camera(#[from] CameraError),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KropperError {
    /// Build a [`KropperError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KropperError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`KropperError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`KropperError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
