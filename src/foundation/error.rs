/// Convenience result type used across the crate.
pub type ParallaxResult<T> = Result<T, ParallaxError>;

/// Top-level error taxonomy used by the public API.
///
/// Degenerate numeric cases in the layout pass (zero-span ratios, non-finite
/// progress) are never reported here; they simply leave progress untouched.
#[derive(thiserror::Error, Debug)]
pub enum ParallaxError {
    /// Descriptor graph that cannot be resolved in declaration order, such as
    /// an anchor that points at an item declared later.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid user-provided geometry or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing scene files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ParallaxError {
    /// Build a [`ParallaxError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ParallaxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ParallaxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
