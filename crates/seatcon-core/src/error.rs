//! Error types for the seatcon coordinator.

use thiserror::Error;

/// Main error type for seatcon operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Required handle missing at a public entry point
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Observer registration with a collaborator failed
    #[error("Subscription failed: {0}")]
    Subscription(String),

    /// Display activation or power-state change failed
    #[error("Device operation failed: {0}")]
    Device(String),

    /// Terminal creation or open failed
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A collaborator ran out of resources during creation
    #[error("Resource exhausted: {0}")]
    Exhausted(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
