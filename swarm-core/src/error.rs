//! Error types for swarm-core

use thiserror::Error;

/// Errors raised while setting up or running a swarm
///
/// Rejected API calls are not errors: they are logged and reported as
/// [`crate::TaskOutcome::Rejected`].
#[derive(Debug, Error)]
pub enum SwarmError {
    /// Transport failure talking to the API
    #[error("HTTP error: {0}")]
    Http(#[from] swarm_http::HttpError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] swarm_config::ConfigError),

    /// A task name that is not part of the catalogue
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// Every task has weight zero
    #[error("No runnable tasks: every task weight is zero")]
    NoRunnableTasks,
}

/// Result type alias for swarm-core
pub type Result<T> = std::result::Result<T, SwarmError>;
