//! Session setup and teardown scripts, run once per test session.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::utils::script_command;

/// Run the session setup script. A missing script is skipped; a script that
/// exits non-zero aborts the session.
pub async fn run_setup(script: &Path) -> Result<()> {
    run_hook(script, "setup").await
}

/// Run the session teardown script. The caller reports a failure without
/// letting it mask the session outcome.
pub async fn run_teardown(script: &Path) -> Result<()> {
    run_hook(script, "teardown").await
}

async fn run_hook(script: &Path, label: &str) -> Result<()> {
    if !script.is_file() {
        log::debug!("no {} script at {}, skipping", label, script.display());
        return Ok(());
    }

    println!(
        "{} Running {} script: {}",
        "▶".green(),
        label,
        script.display().to_string().cyan()
    );

    let status = script_command(script)
        .status()
        .await
        .with_context(|| format!("Failed to run {} script: {}", label, script.display()))?;

    if !status.success() {
        anyhow::bail!("{} script failed ({})", label, status);
    }
    Ok(())
}
