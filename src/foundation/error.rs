/// Convenience result type used across the crate.
pub type FxResult<T> = Result<T, FxError>;

/// Top-level error taxonomy for effect construction, animation and loading.
#[derive(thiserror::Error, Debug)]
pub enum FxError {
    /// An effect spec named a filter type that is not registered.
    #[error("unknown filter kind '{0}'")]
    UnknownFilterKind(String),

    /// A transition targeted an animation that was never imported.
    #[error("unknown animation '{animation}' (available: {available:?})")]
    UnknownAnimationName {
        /// Requested animation name.
        animation: String,
        /// Animation names known at the time of the request.
        available: Vec<String>,
    },

    /// A parameter name is not declared by the filter kind.
    #[error("filter '{filter}' has no parameter '{param}'")]
    UnknownParameter {
        /// Filter type name.
        filter: &'static str,
        /// Requested parameter name.
        param: String,
    },

    /// Fetching an index or effect document failed.
    #[error("load error: {0}")]
    Load(String),

    /// Invalid user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid keyframe data or animation state.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    /// Build a [`FxError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`FxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FxError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`FxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
