use std::env;

/// Environment inputs, captured once at process start
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    /// Continuous-integration indicator (`CI` present and non-empty)
    pub ci: bool,

    /// Base address override (`BASE_URL`), kept verbatim when set
    pub base_url: Option<String>,
}

impl EnvSettings {
    /// Snapshot the process environment. Resolution itself stays a pure
    /// function of this snapshot.
    pub fn capture() -> Self {
        Self {
            ci: env::var("CI").map(|v| !v.is_empty()).unwrap_or(false),
            base_url: env::var("BASE_URL").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn local() -> Self {
        Self::default()
    }

    pub fn ci() -> Self {
        Self {
            ci: true,
            base_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_reads_ci_and_base_url() {
        // Single test owns both variables to avoid interleaving with other
        // tests in the same process.
        env::remove_var("CI");
        env::remove_var("BASE_URL");
        let settings = EnvSettings::capture();
        assert!(!settings.ci);
        assert_eq!(settings.base_url, None);

        env::set_var("CI", "true");
        env::set_var("BASE_URL", "https://staging.example.com");
        let settings = EnvSettings::capture();
        assert!(settings.ci);
        assert_eq!(
            settings.base_url.as_deref(),
            Some("https://staging.example.com")
        );

        // Empty values count as absent
        env::set_var("CI", "");
        env::set_var("BASE_URL", "");
        let settings = EnvSettings::capture();
        assert!(!settings.ci);
        assert_eq!(settings.base_url, None);

        env::remove_var("CI");
        env::remove_var("BASE_URL");
    }
}
