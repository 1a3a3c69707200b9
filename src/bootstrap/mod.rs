//! Session boundary sequence: hooks, service availability, engine hand-off.
//!
//! This module schedules nothing and executes no tests. It makes the run
//! environment ready, writes the manifest, and optionally waits on a
//! user-supplied engine command.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{EnvSettings, RunConfig};
use crate::discovery;
use crate::hooks;
use crate::manifest::EngineManifest;
use crate::server::DevServer;
use crate::utils::{resolve_program, shell_command};

/// Options for one bootstrap session
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Engine command, invoked with the manifest path appended
    pub engine: Option<String>,

    /// Refuse to reuse an already-listening dev server
    pub no_reuse: bool,

    /// Skip the session setup/teardown scripts
    pub skip_hooks: bool,
}

/// Resolve the configuration from the environment snapshot and run the full
/// session sequence.
pub async fn run(env: &EnvSettings, opts: &BootstrapOptions) -> Result<()> {
    run_with_config(RunConfig::resolve(env), opts).await
}

/// Run the session sequence for an already-resolved configuration.
///
/// Teardown and server shutdown run even when the engine command fails; a
/// setup failure aborts before anything needs cleaning up.
pub async fn run_with_config(config: RunConfig, opts: &BootstrapOptions) -> Result<()> {
    if let Err(errors) = config.validate() {
        for error in &errors {
            println!("{} {}", "✗".red(), error);
        }
        anyhow::bail!("Configuration is invalid ({} violation(s))", errors.len());
    }

    let specs = discovery::discover_specs(&config)?;
    if specs.is_empty() {
        anyhow::bail!(
            "No test specifications matched {:?} under {}",
            config.spec_pattern,
            config.test_dir.display()
        );
    }
    println!(
        "{} {} test specification(s) discovered",
        "✓".green(),
        specs.len()
    );

    if !opts.skip_hooks {
        hooks::run_setup(&config.global_setup).await?;
    }

    let mut server = config.web_server.clone().map(|mut ws| {
        if opts.no_reuse {
            ws.reuse_existing = false;
        }
        DevServer::new(ws)
    });

    let result = hand_off(&config, specs, server.as_mut(), opts).await;

    if !opts.skip_hooks {
        if let Err(e) = hooks::run_teardown(&config.global_teardown).await {
            println!("{} Teardown failed: {:#}", "⚠".yellow(), e);
        }
    }
    if let Some(server) = server.as_mut() {
        if let Err(e) = server.stop().await {
            println!("{} {:#}", "⚠".yellow(), e);
        }
    }

    result
}

async fn hand_off(
    config: &RunConfig,
    specs: Vec<std::path::PathBuf>,
    server: Option<&mut DevServer>,
    opts: &BootstrapOptions,
) -> Result<()> {
    match server {
        Some(server) => {
            server.ensure().await?;
        }
        None => {
            log::info!("no web server block; assuming the service is already running");
        }
    }

    let manifest = EngineManifest::new(config.clone(), specs);
    let path = manifest.write(&config.output_dir)?;
    println!("{} Engine manifest written: {}", "✓".green(), path.display());

    if let Some(engine) = &opts.engine {
        resolve_program(engine)?;
        println!("{} Handing off to engine: {}", "▶".green(), engine.cyan());

        let status = shell_command(&format!("{} {}", engine, path.display()))
            .status()
            .await
            .with_context(|| format!("Failed to run engine command: {}", engine))?;

        if !status.success() {
            anyhow::bail!("Engine exited with {}", status);
        }
        println!("{} Engine finished.", "✓".green());
    }

    Ok(())
}
