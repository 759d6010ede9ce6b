//! Simulated users for load testing the language-tracker API
//!
//! A [`SimulatedUser`] owns just enough state (credentials and a bearer
//! token) to chain registration, login and the authorized resource calls.
//! [`Swarm`] runs many of them concurrently, each picking weighted-random
//! [`Task`]s until the run ends.

pub mod error;
pub mod fake;
pub mod payloads;
pub mod runner;
pub mod task;
pub mod user;

pub use error::{Result, SwarmError};
pub use fake::FakeData;
pub use runner::{RunSummary, Swarm};
pub use task::{Task, TaskSet};
pub use user::{Credentials, SimulatedUser, TaskOutcome};
