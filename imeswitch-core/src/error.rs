//! Error types for the switching cascade

use thiserror::Error;

/// Failure of a single platform primitive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("{call} did not complete in time")]
    Timeout { call: &'static str },

    #[error("{call} failed with code {code:#010X}")]
    ApiFailure { call: &'static str, code: u32 },
}

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("No focused window with a supported keyboard layout")]
    UnresolvableTarget,

    #[error("Platform call failed: {0}")]
    Platform(#[from] PlatformError),

    #[error("all methods failed")]
    AllStrategiesExhausted,

    #[error("{0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SwitchError>;
