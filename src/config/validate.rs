use std::collections::HashSet;
use thiserror::Error;

use super::RunConfig;

/// A violation found in a resolved configuration record
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("per-test timeout must be strictly positive")]
    ZeroTestTimeout,

    #[error("assertion timeout must be strictly positive")]
    ZeroExpectTimeout,

    #[error("worker count must be strictly positive when specified")]
    ZeroWorkers,

    #[error("test directory path is empty")]
    EmptyTestDir,

    #[error("spec pattern {pattern:?} is not a valid glob: {reason}")]
    BadSpecPattern { pattern: String, reason: String },

    #[error("no browser profiles declared")]
    NoProfiles,

    #[error("duplicate profile name: {0:?}")]
    DuplicateProfile(String),

    #[error("no reporters declared")]
    NoReporters,

    #[error("web server command is empty")]
    EmptyServerCommand,

    #[error("web server ready URL must be http(s), got {0:?}")]
    BadReadyUrl(String),

    #[error("web server startup timeout must be strictly positive")]
    ZeroStartupTimeout,
}

impl RunConfig {
    /// Check the record before hand-off. All violations are collected so a
    /// single `check` run reports everything at once.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if self.test_timeout_ms == 0 {
            errors.push(ConfigError::ZeroTestTimeout);
        }
        if self.expect_timeout_ms == 0 {
            errors.push(ConfigError::ZeroExpectTimeout);
        }
        if self.expect_timeout_ms > self.test_timeout_ms {
            // Unusual but not fatal: a single expectation may then outlive
            // its test.
            log::warn!(
                "assertion timeout ({}ms) exceeds per-test timeout ({}ms)",
                self.expect_timeout_ms,
                self.test_timeout_ms
            );
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                errors.push(ConfigError::ZeroWorkers);
            }
        }
        if self.test_dir.as_os_str().is_empty() {
            errors.push(ConfigError::EmptyTestDir);
        }
        if let Err(e) = glob::Pattern::new(&self.spec_pattern) {
            errors.push(ConfigError::BadSpecPattern {
                pattern: self.spec_pattern.clone(),
                reason: e.to_string(),
            });
        }

        if self.profiles.is_empty() {
            errors.push(ConfigError::NoProfiles);
        }
        let mut seen = HashSet::new();
        for profile in &self.profiles {
            if !seen.insert(profile.name.as_str()) {
                errors.push(ConfigError::DuplicateProfile(profile.name.clone()));
            }
        }

        if self.reporters.is_empty() {
            errors.push(ConfigError::NoReporters);
        }

        if let Some(server) = &self.web_server {
            if server.command.trim().is_empty() {
                errors.push(ConfigError::EmptyServerCommand);
            }
            if !server.ready_url.starts_with("http://") && !server.ready_url.starts_with("https://")
            {
                errors.push(ConfigError::BadReadyUrl(server.ready_url.clone()));
            }
            if server.startup_timeout_ms == 0 {
                errors.push(ConfigError::ZeroStartupTimeout);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvSettings, WebServerConfig};

    fn local_config() -> RunConfig {
        RunConfig::resolve(&EnvSettings::local())
    }

    #[test]
    fn test_resolved_records_are_valid() {
        assert!(local_config().validate().is_ok());
        assert!(RunConfig::resolve(&EnvSettings::ci()).validate().is_ok());
    }

    #[test]
    fn test_zero_timeouts_are_rejected() {
        let mut config = local_config();
        config.test_timeout_ms = 0;
        config.expect_timeout_ms = 0;
        let errors = config.validate().unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::ZeroTestTimeout)));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::ZeroExpectTimeout)));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = local_config();
        config.workers = Some(0);
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ConfigError::ZeroWorkers)));
    }

    #[test]
    fn test_duplicate_profile_names_rejected() {
        let mut config = local_config();
        let dup = config.profiles[0].clone();
        config.profiles.push(dup);
        let errors = config.validate().unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::DuplicateProfile(name) if name == "chromium")));
    }

    #[test]
    fn test_empty_profiles_rejected() {
        let mut config = local_config();
        config.profiles.clear();
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ConfigError::NoProfiles)));
    }

    #[test]
    fn test_server_block_checks() {
        let mut config = local_config();
        config.web_server = Some(WebServerConfig {
            command: "  ".to_string(),
            ready_url: "localhost:3000".to_string(),
            startup_timeout_ms: 0,
            reuse_existing: true,
        });
        let errors = config.validate().unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::EmptyServerCommand)));
        assert!(errors.iter().any(|e| matches!(e, ConfigError::BadReadyUrl(_))));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::ZeroStartupTimeout)));
    }

    #[test]
    fn test_server_checks_skipped_when_block_absent() {
        let mut config = RunConfig::resolve(&EnvSettings::ci());
        assert!(config.web_server.is_none());
        config.test_timeout_ms = 0;
        let errors = config.validate().unwrap_err();
        // Only the timeout violation, nothing server-related
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_bad_glob_pattern_rejected() {
        let mut config = local_config();
        config.spec_pattern = "[".to_string();
        let errors = config.validate().unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::BadSpecPattern { .. })));
    }
}
