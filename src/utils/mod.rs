use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Resolve the program token of a shell command against the system PATH.
/// Used as a preflight so a typo'd command fails with a clear message
/// instead of a shell error deep in a session.
pub fn resolve_program(command: &str) -> Result<PathBuf> {
    let program = command
        .split_whitespace()
        .next()
        .context("Command is empty")?;

    which::which(program).with_context(|| format!("Program not found on PATH: {}", program))
}

/// Build a command that runs `command` through the platform shell.
pub fn shell_command(command: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

/// Build a command that runs a script file via the shell interpreter, so the
/// script does not need an executable bit.
pub fn script_command(script: &Path) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(script);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg(script);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_program_uses_first_token() {
        let path = resolve_program("sh -c 'echo hi'").unwrap();
        assert!(path.ends_with("sh"));
    }

    #[test]
    fn test_resolve_program_rejects_unknown_binary() {
        assert!(resolve_program("definitely-not-a-real-binary-0xE2E").is_err());
    }

    #[test]
    fn test_resolve_program_rejects_empty_command() {
        assert!(resolve_program("   ").is_err());
    }

    #[tokio::test]
    async fn test_shell_command_runs_through_shell() {
        let status = shell_command("exit 0").status().await.unwrap();
        assert!(status.success());

        let status = shell_command("exit 3").status().await.unwrap();
        assert_eq!(status.code(), Some(3));
    }
}
