//! Error types for the 2048 environment

use thiserror::Error;

/// Result type for environment operations
pub type Result<T> = std::result::Result<T, Twenty48Error>;

/// Environment error types
#[derive(Debug, Error)]
pub enum Twenty48Error {
    /// Raw action value or name that does not map to a direction
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Episode already terminated
    #[error("Episode terminated, call reset")]
    EpisodeTerminated,

    /// Configuration rejected during validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Twenty48Error {
    fn from(err: serde_json::Error) -> Self {
        Twenty48Error::SerializationError(err.to_string())
    }
}

impl Twenty48Error {
    /// Numeric code for machine consumers
    pub fn code(&self) -> i32 {
        match self {
            Twenty48Error::InvalidAction(_) => error_codes::INVALID_ACTION,
            Twenty48Error::EpisodeTerminated => error_codes::EPISODE_TERMINATED,
            Twenty48Error::InvalidConfig(_) => error_codes::INVALID_CONFIG,
            Twenty48Error::SerializationError(_) => error_codes::SERIALIZATION,
        }
    }
}

/// Stable numeric error codes
pub mod error_codes {
    pub const INVALID_ACTION: i32 = 1;
    pub const EPISODE_TERMINATED: i32 = 2;
    pub const INVALID_CONFIG: i32 = 3;
    pub const SERIALIZATION: i32 = 4;
}
