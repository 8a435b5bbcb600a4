//! Errors raised while reading the data behind the profile cards.
pub type Result<T> = std::result::Result<T, CardError>;

#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// The API answered that the login does not exist.
    #[error("user not found")]
    UserNotFound,

    #[error("invalid stats data: {0}")]
    InvalidStats(String),

    #[error("invalid language data: {0}")]
    InvalidLanguages(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CardError {
    #[must_use]
    pub fn invalid_stats(msg: impl Into<String>) -> Self {
        Self::InvalidStats(msg.into())
    }

    #[must_use]
    pub fn invalid_languages(msg: impl Into<String>) -> Self {
        Self::InvalidLanguages(msg.into())
    }
}
