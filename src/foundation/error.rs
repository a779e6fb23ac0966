/// Convenience result alias used across the crate.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Error taxonomy for the viewer core.
///
/// None of these are fatal to the process. Callers degrade (skip the animation, show the page
/// directly) and report the degradation through logging.
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    /// The document could not be parsed or opened.
    #[error("load error: {0}")]
    Load(String),

    /// A page could not be rendered at the requested scale. Retried on the next navigation.
    #[error("rasterization error on page {page}: {reason}")]
    Rasterization {
        /// 1-based page that failed.
        page: u32,
        /// Human readable failure reason.
        reason: String,
    },

    /// Graphics context or program compilation failed. Transitions are disabled for the session.
    #[error("graphics init error: {0}")]
    GraphicsInit(String),

    /// Invalid input (out-of-range page, malformed configuration, mismatched buffers).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration or document manifest (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ViewerError {
    /// Build a [`ViewerError::Load`].
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`ViewerError::Rasterization`] for `page`.
    pub fn rasterization(page: u32, reason: impl Into<String>) -> Self {
        Self::Rasterization {
            page,
            reason: reason.into(),
        }
    }

    /// Build a [`ViewerError::GraphicsInit`].
    pub fn graphics_init(msg: impl Into<String>) -> Self {
        Self::GraphicsInit(msg.into())
    }

    /// Build a [`ViewerError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ViewerError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` when the error should disable transitions for the rest of the session.
    pub fn is_graphics_init(&self) -> bool {
        matches!(self, Self::GraphicsInit(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
