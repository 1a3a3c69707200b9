use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::RunConfig;

/// File name of the hand-off record under the output directory
pub const MANIFEST_FILE: &str = "run-manifest.json";

/// The record handed to the external test-execution engine: the resolved
/// configuration plus the discovered specification set for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineManifest {
    pub session_id: String,
    pub generated_at: String,
    pub config: RunConfig,
    pub specs: Vec<PathBuf>,
}

impl EngineManifest {
    pub fn new(config: RunConfig, specs: Vec<PathBuf>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            config,
            specs,
        }
    }

    /// Write the manifest under the given directory, creating it if needed.
    pub fn write(&self, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;

        let path = output_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvSettings;

    #[test]
    fn test_manifest_round_trip() {
        let config = RunConfig::resolve(&EnvSettings::ci());
        let specs = vec![PathBuf::from("e2e/login.spec.yaml")];
        let manifest = EngineManifest::new(config, specs);

        assert!(!manifest.session_id.is_empty());

        let json = serde_json::to_string(&manifest).unwrap();
        assert!(json.contains(r#""sessionId""#));
        assert!(json.contains(r#""generatedAt""#));

        let back: EngineManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.session_id, manifest.session_id);
        assert_eq!(back.specs, manifest.specs);
        assert_eq!(back.config, manifest.config);
    }

    #[test]
    fn test_write_creates_output_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("reports");

        let config = RunConfig::resolve(&EnvSettings::local());
        let manifest = EngineManifest::new(config, Vec::new());
        let path = manifest.write(&out).unwrap();

        assert!(path.ends_with(MANIFEST_FILE));
        let content = std::fs::read_to_string(&path).unwrap();
        let back: EngineManifest = serde_json::from_str(&content).unwrap();
        assert_eq!(back.session_id, manifest.session_id);
    }

    #[test]
    fn test_fresh_session_ids() {
        let config = RunConfig::resolve(&EnvSettings::local());
        let a = EngineManifest::new(config.clone(), Vec::new());
        let b = EngineManifest::new(config, Vec::new());
        assert_ne!(a.session_id, b.session_id);
    }
}
