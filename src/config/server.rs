use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Auxiliary service lifecycle block. Present only outside CI; under CI the
/// service is assumed to be running already.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebServerConfig {
    /// Shell command that starts the service under test
    pub command: String,

    /// Readiness-check address, polled until the service answers
    pub ready_url: String,

    /// Max wait for the service to become ready (ms)
    pub startup_timeout_ms: u64,

    /// Reuse an instance that is already listening instead of failing
    pub reuse_existing: bool,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            command: "npm run dev".to_string(),
            ready_url: "http://localhost:3000/health".to_string(),
            startup_timeout_ms: 120_000,
            reuse_existing: true,
        }
    }
}

impl WebServerConfig {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }
}
