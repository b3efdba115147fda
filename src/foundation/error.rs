/// Convenience result type used across driftmap.
pub type DriftMapResult<T> = Result<T, DriftMapError>;

/// Top-level error taxonomy used by the generation and rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum DriftMapError {
    /// Rejected mapper or render configuration (raised before any generation happens).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure inside the raster backend (surface sizes, font data, draw lists).
    #[error("render error: {0}")]
    Render(String),

    /// Failure while encoding frames into PNG/GIF or other image formats.
    #[error("encode error: {0}")]
    Encode(String),

    /// Filesystem errors from writing artifacts.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DriftMapError {
    /// Build a [`DriftMapError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build a [`DriftMapError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DriftMapError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

impl From<image::ImageError> for DriftMapError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::Encode(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
