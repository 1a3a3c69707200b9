pub mod context;
pub mod env;
pub mod profiles;
pub mod reporters;
pub mod server;
pub mod validate;

pub use context::{CapturePolicy, RunContext, DEFAULT_BASE_URL};
pub use env::EnvSettings;
pub use profiles::{BrowserEngine, Profile, Viewport};
pub use reporters::Reporter;
pub use server::WebServerConfig;
pub use validate::ConfigError;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where test specifications live
pub const DEFAULT_TEST_DIR: &str = "e2e";

/// File-name pattern identifying a test specification
pub const DEFAULT_SPEC_PATTERN: &str = "*.spec.yaml";

/// The fully-resolved test-run configuration handed to the external engine.
///
/// Constructed once per process from an environment snapshot plus literal
/// defaults, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Directory of test specification files
    pub test_dir: PathBuf,

    /// File-name pattern a specification must match
    pub spec_pattern: String,

    /// Max wall-clock time per test case (ms)
    pub test_timeout_ms: u64,

    /// Max wait for a single expectation (ms)
    pub expect_timeout_ms: u64,

    /// Whether independent spec files may run concurrently
    pub fully_parallel: bool,

    /// Reject test-local `only` overrides (CI)
    pub forbid_only: bool,

    /// Re-attempts per failed test
    pub retries: u32,

    /// Concurrent execution slots; `None` leaves the engine default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<u32>,

    /// Output sinks, in precedence order
    pub reporters: Vec<Reporter>,

    /// Options shared by every test
    pub context: RunContext,

    /// Browser/device matrix; the spec set runs once per profile
    pub profiles: Vec<Profile>,

    /// Local service lifecycle; absent under CI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_server: Option<WebServerConfig>,

    /// Session setup script, run once before any test
    pub global_setup: PathBuf,

    /// Session teardown script, run once after all tests
    pub global_teardown: PathBuf,

    /// Root directory for output artifacts
    pub output_dir: PathBuf,
}

impl RunConfig {
    /// Resolve the full record from an environment snapshot and literal
    /// defaults. Pure: same snapshot, same record.
    pub fn resolve(env: &EnvSettings) -> Self {
        let output_dir = PathBuf::from("reports");

        Self {
            test_dir: PathBuf::from(DEFAULT_TEST_DIR),
            spec_pattern: DEFAULT_SPEC_PATTERN.to_string(),
            test_timeout_ms: 30_000,
            expect_timeout_ms: 5_000,
            fully_parallel: true,
            forbid_only: env.ci,
            retries: if env.ci { 2 } else { 0 },
            workers: if env.ci { Some(1) } else { None },
            reporters: reporters::reporter_plan(&output_dir, env.ci),
            context: RunContext::resolve(env.base_url.as_deref()),
            profiles: profiles::default_profiles(),
            web_server: if env.ci {
                None
            } else {
                Some(WebServerConfig::default())
            },
            global_setup: PathBuf::from("e2e/global-setup.sh"),
            global_teardown: PathBuf::from("e2e/global-teardown.sh"),
            output_dir,
        }
    }

    pub fn test_timeout(&self) -> Duration {
        Duration::from_millis(self.test_timeout_ms)
    }

    pub fn expect_timeout(&self) -> Duration {
        Duration::from_millis(self.expect_timeout_ms)
    }
}
