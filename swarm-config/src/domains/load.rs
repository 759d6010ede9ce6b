//! Load shape configuration: how many simulated users, how fast, for how long

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Slowest accepted spawn rate: one user every 1000 seconds
pub const MIN_SPAWN_RATE: f64 = 0.001;

/// Load shape configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Number of concurrent simulated users
    #[serde(default = "default_users")]
    pub users: usize,

    /// Users started per second until `users` is reached
    #[serde(default = "default_spawn_rate")]
    pub spawn_rate: f64,

    /// Total run time; runs until interrupted when absent
    #[serde(
        with = "crate::domains::utils::serde_duration_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub run_time: Option<Duration>,

    /// Lower bound of the pause between two tasks of one user
    #[serde(
        rename = "min_wait_ms",
        with = "crate::domains::utils::serde_duration_millis",
        default
    )]
    pub min_wait: Duration,

    /// Upper bound of the pause between two tasks of one user
    #[serde(
        rename = "max_wait_ms",
        with = "crate::domains::utils::serde_duration_millis",
        default
    )]
    pub max_wait: Duration,

    /// Seed for reproducible fake data and task selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Task weights by task name; tasks not listed keep weight 1
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tasks: BTreeMap<String, u32>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            spawn_rate: default_spawn_rate(),
            run_time: None,
            min_wait: Duration::ZERO,
            max_wait: Duration::ZERO,
            seed: None,
            tasks: BTreeMap::new(),
        }
    }
}

impl Validatable for LoadConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.users, "users", self.domain_name())?;

        if !self.spawn_rate.is_finite() {
            return Err(self.validation_error("spawn_rate must be a finite number"));
        }
        validate_positive(self.spawn_rate, "spawn_rate", self.domain_name())?;
        if self.spawn_rate < MIN_SPAWN_RATE {
            return Err(self.validation_error(format!(
                "spawn_rate ({}) must be at least {} users per second",
                self.spawn_rate, MIN_SPAWN_RATE
            )));
        }

        if let Some(run_time) = self.run_time {
            validate_positive(run_time.as_secs(), "run_time", self.domain_name())?;
        }

        if self.min_wait > self.max_wait {
            return Err(self.validation_error(format!(
                "min_wait_ms ({}) cannot exceed max_wait_ms ({})",
                self.min_wait.as_millis(),
                self.max_wait.as_millis()
            )));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "load"
    }
}

fn default_users() -> usize {
    1
}

fn default_spawn_rate() -> f64 {
    1.0
}
