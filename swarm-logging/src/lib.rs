//! Structured logging setup for swarm
//!
//! Every crate in the workspace logs through `tracing`; this crate installs
//! the global subscriber from a [`LoggingConfig`].

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
pub use swarm_config::{LogFormat, LogLevel, LoggingConfig};
