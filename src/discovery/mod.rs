use anyhow::{Context, Result};
use glob::Pattern;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::config::RunConfig;

/// Collect the test specification set the configuration declares.
///
/// Files are matched by name against the spec pattern; the session hook
/// scripts never count as specifications even when their names match.
/// Results are sorted so the manifest is stable across runs.
pub fn discover_specs(config: &RunConfig) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(&config.spec_pattern)
        .with_context(|| format!("Invalid spec pattern: {:?}", config.spec_pattern))?;

    if !config.test_dir.is_dir() {
        anyhow::bail!(
            "Test directory not found: {}",
            config.test_dir.display()
        );
    }

    let hook_names = [
        config.global_setup.file_name(),
        config.global_teardown.file_name(),
    ];

    let mut specs = Vec::new();
    for entry in WalkDir::new(&config.test_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let is_hook = hook_names
            .iter()
            .any(|h| h.map_or(false, |name| name == entry.file_name()));
        if is_hook {
            continue;
        }

        if pattern.matches(&entry.file_name().to_string_lossy()) {
            specs.push(entry.path().to_path_buf());
        }
    }

    specs.sort();
    log::debug!(
        "discovered {} spec(s) under {}",
        specs.len(),
        config.test_dir.display()
    );
    Ok(specs)
}

/// Confirm each discovered specification is a readable, non-empty YAML
/// document.
pub fn verify_specs(specs: &[PathBuf]) -> Result<()> {
    for path in specs {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read spec: {}", path.display()))?;

        if content.trim().is_empty() {
            anyhow::bail!("Spec file is empty: {}", path.display());
        }

        serde_yaml::from_str::<serde_yaml::Value>(&content)
            .with_context(|| format!("Spec is not valid YAML: {}", path.display()))?;
    }
    Ok(())
}
