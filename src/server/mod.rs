//! Auxiliary service lifecycle.
//!
//! Starts the local service under test, or attaches to an instance that is
//! already listening, and waits until the readiness endpoint answers.

use anyhow::{Context, Result};
use colored::Colorize;
use std::time::Duration;
use tokio::process::Child;

use crate::config::WebServerConfig;
use crate::utils::{resolve_program, shell_command};

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// How the service came to be available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// An instance was already listening; nothing was spawned
    Reused,
    /// This process spawned the instance and owns its lifetime
    Started,
}

pub struct DevServer {
    config: WebServerConfig,
    client: reqwest::Client,
    child: Option<Child>,
}

impl DevServer {
    pub fn new(config: WebServerConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            child: None,
        }
    }

    /// True when this process spawned the service and owns its lifetime
    pub fn owns_process(&self) -> bool {
        self.child.is_some()
    }

    /// Make the service available: reuse a listening instance when the
    /// policy allows it, otherwise spawn the configured command and poll the
    /// ready URL until it answers or the startup timeout elapses.
    pub async fn ensure(&mut self) -> Result<ServerState> {
        if self.probe().await {
            if self.config.reuse_existing {
                println!(
                    "{} Reusing server already listening at {}",
                    "✓".green(),
                    self.config.ready_url.cyan()
                );
                return Ok(ServerState::Reused);
            }
            anyhow::bail!(
                "A server is already listening at {} and reuse is disallowed",
                self.config.ready_url
            );
        }

        resolve_program(&self.config.command)?;
        println!(
            "{} Starting dev server: {}",
            "▶".green(),
            self.config.command.cyan()
        );

        let child = shell_command(&self.config.command)
            .spawn()
            .with_context(|| format!("Failed to start dev server: {}", self.config.command))?;
        self.child = Some(child);

        let deadline = tokio::time::Instant::now() + self.config.startup_timeout();
        loop {
            if self.probe().await {
                println!("{} Dev server ready.", "✓".green());
                return Ok(ServerState::Started);
            }

            if let Some(child) = self.child.as_mut() {
                if let Some(status) = child.try_wait().context("Failed to poll dev server")? {
                    self.child = None;
                    anyhow::bail!("Dev server exited before becoming ready ({})", status);
                }
            }

            if tokio::time::Instant::now() >= deadline {
                self.stop().await?;
                anyhow::bail!(
                    "Dev server did not become ready within {}ms: {}",
                    self.config.startup_timeout_ms,
                    self.config.ready_url
                );
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Stop the service if this process started it. Reused instances are
    /// left running.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            child.kill().await.context("Failed to stop dev server")?;
            let _ = child.wait().await;
            println!("{} Dev server stopped.", "⏹".yellow());
        }
        Ok(())
    }

    /// One readiness probe. Any response below 500 counts as ready; a
    /// connection error means the service is not listening yet.
    async fn probe(&self) -> bool {
        match self
            .client
            .get(&self.config.ready_url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().as_u16() < 500,
            Err(e) => {
                log::trace!("probe {}: {}", self.config.ready_url, e);
                false
            }
        }
    }
}
