// Error types for Runner module

use thiserror::Error;

/// Runner error types
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to start '{0}': {1}")]
    Spawn(String, std::io::Error),

    #[error("Standard {0} of the script process was not captured")]
    MissingPipe(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
