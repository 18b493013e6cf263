use thiserror::Error;

/// Top-level error type for the turno system.
///
/// Each variant wraps a subsystem-specific failure. Higher-level crates define
/// their own error types and implement `From<TurnoError>` so that the `?`
/// operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TurnoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory error: {0}")]
    Directory(String),

    #[error("Availability error: {0}")]
    Availability(String),

    #[error("Scheduling error: {0}")]
    Scheduling(String),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid time zone offset: {minutes} minutes")]
    InvalidOffset { minutes: i32 },
}

impl From<toml::de::Error> for TurnoError {
    fn from(err: toml::de::Error) -> Self {
        TurnoError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TurnoError {
    fn from(err: toml::ser::Error) -> Self {
        TurnoError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TurnoError {
    fn from(err: serde_json::Error) -> Self {
        TurnoError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for turno operations.
pub type Result<T> = std::result::Result<T, TurnoError>;
