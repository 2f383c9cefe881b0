/// Result alias used across the crate.
pub type FlypathResult<T> = Result<T, FlypathError>;

#[derive(thiserror::Error, Debug)]
pub enum FlypathError {
    #[error("validation error: {0}")]
    Validation(String),

    /// Nothing left to animate. The message is meant for the end user.
    #[error("input error: {0}")]
    Input(String),

    #[error("lookup error: {0}")]
    Lookup(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlypathError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// The text shown to a user for input errors; the full display string otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for FlypathError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
