//! HTTP transport for swarm
//!
//! Simulated users talk to the API under test through the [`ApiClient`]
//! trait; [`HttpManager`] is the pooled `reqwest` implementation shared by
//! every user of a run.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-export main types for convenience
pub use client::{ApiClient, HttpManager};
pub use config::HttpConfig;
pub use errors::HttpError;
pub use types::{ApiRequest, ApiResponse, HttpMethod};
