//! Target API configuration

use crate::error::ConfigResult;
use crate::validation::{validate_http_url, Validatable};
use serde::{Deserialize, Serialize};

/// Default host of the API under test
pub const DEFAULT_HOST: &str = "http://localhost:3000";

/// Where the simulated users send their traffic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL of the API, without a trailing path
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
        }
    }
}

impl Validatable for TargetConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_http_url(&self.host, "host", self.domain_name())
    }

    fn domain_name(&self) -> &'static str {
        "target"
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
