//! Configuration management for the swarm load generator
//!
//! Configuration is split by concern (target API, HTTP client, load shape,
//! logging) and supports YAML files, defaults and `SWARM_*` environment
//! overrides.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    http::HttpConfig,
    load::LoadConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    target::TargetConfig,
    SwarmConfig,
};

// Re-export utilities
pub use domains::utils::{serde_duration, serde_duration_millis};
