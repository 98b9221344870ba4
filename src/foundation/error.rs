pub type PonderResult<T> = Result<T, PonderError>;

/// Errors surfaced by loading, compiling and navigating scripts.
///
/// Command failures during playback are not errors here: they are logged and halt only the
/// fragment that issued them.
#[derive(thiserror::Error, Debug)]
pub enum PonderError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("scene index {index} is out of range [0, {count})")]
    SceneOutOfRange { index: usize, count: usize },

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PonderError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PonderError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
