/// Convenience result type used across brandmark.
pub type BrandmarkResult<T> = Result<T, BrandmarkError>;

/// Top-level error taxonomy used by the composition pipeline.
#[derive(thiserror::Error, Debug)]
pub enum BrandmarkError {
    /// A required asset could not be fetched or decoded. Terminal for the current render.
    #[error("load error: {asset}: {reason}")]
    Load {
        /// Short label of the asset source that failed.
        asset: String,
        /// Underlying fetch or decode failure.
        reason: String,
    },

    /// A required input (the base image) was not supplied.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// Invalid configuration or surface parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Backend failures while executing a draw plan.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BrandmarkError {
    /// Build a [`BrandmarkError::Load`] value.
    pub fn load(asset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Load {
            asset: asset.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`BrandmarkError::MissingInput`] value.
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Build a [`BrandmarkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BrandmarkError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BrandmarkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for asset fetch/decode failures.
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
