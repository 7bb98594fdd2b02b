/// Convenience result type used across the atlas.
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Top-level error taxonomy used by atlas APIs.
#[derive(thiserror::Error, Debug)]
pub enum AtlasError {
    /// A frame index outside `[0, max_frame]` was requested.
    #[error("invalid frame {frame}: must be within [0, {max_frame}]")]
    InvalidFrame {
        /// Requested frame.
        frame: u64,
        /// Inclusive upper bound of the catalog's frame sequence.
        max_frame: u64,
    },

    /// Invalid user-provided or catalog data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors while rasterizing or writing a rendered frame.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AtlasError {
    /// Build an [`AtlasError::InvalidFrame`] value.
    pub fn invalid_frame(frame: u64, max_frame: u64) -> Self {
        Self::InvalidFrame { frame, max_frame }
    }

    /// Build an [`AtlasError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AtlasError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`AtlasError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build an [`AtlasError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// `true` for the one recoverable core error: an out-of-range frame.
    pub fn is_invalid_frame(&self) -> bool {
        matches!(self, Self::InvalidFrame { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
