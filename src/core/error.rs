use thiserror::Error;

/// Errors for the outer surfaces (config files, console I/O).
///
/// The simulation core itself has no recoverable failures: trip
/// conditions are state transitions, and invalid action inputs are
/// clamped rather than rejected.
#[derive(Error, Debug)]
pub enum ControlRoomError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ControlRoomError>;
