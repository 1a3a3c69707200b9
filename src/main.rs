use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use e2e_rig::bootstrap::{self, BootstrapOptions};
use e2e_rig::config::{EnvSettings, RunConfig};
use e2e_rig::server::DevServer;
use e2e_rig::{discovery, utils};

#[derive(Parser)]
#[command(name = "e2e-rig")]
#[command(version = "0.1.0")]
#[command(about = "End-to-end test-run configuration and bootstrap CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fully-resolved run configuration
    Resolve {
        /// Output format (json, yaml)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the resolved configuration and the test-file set
    Check,

    /// List the test specification files the configuration selects
    Discover {
        /// Also verify each file is readable, non-empty YAML
        #[arg(long, default_value = "false")]
        verify: bool,
    },

    /// Start (or reuse) the dev server and hold it until Ctrl+C
    Serve {
        /// Fail instead of reusing an already-listening server
        #[arg(long, default_value = "false")]
        no_reuse: bool,
    },

    /// Run the full session bootstrap and hand off to the engine
    Bootstrap {
        /// Engine command; invoked with the manifest path appended
        #[arg(short, long)]
        engine: Option<String>,

        /// Fail instead of reusing an already-listening server
        #[arg(long, default_value = "false")]
        no_reuse: bool,

        /// Skip the session setup/teardown scripts
        #[arg(long, default_value = "false")]
        skip_hooks: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let env = EnvSettings::capture();

    match cli.command {
        Commands::Resolve { format, output } => {
            let config = RunConfig::resolve(&env);
            let rendered = match format.as_str() {
                "json" => serde_json::to_string_pretty(&config)?,
                "yaml" => serde_yaml::to_string(&config)?,
                _ => anyhow::bail!("Unknown format: {}", format),
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("Resolved configuration saved to: {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Check => {
            println!(
                "{} Checking run configuration ({} mode)...",
                "▶".green().bold(),
                if env.ci { "CI".yellow() } else { "local".cyan() }
            );
            let config = RunConfig::resolve(&env);
            let mut failed = false;

            match config.validate() {
                Ok(()) => println!("{} Configuration record is valid", "✓".green()),
                Err(errors) => {
                    failed = true;
                    for error in errors {
                        println!("{} {}", "✗".red(), error);
                    }
                }
            }

            match discovery::discover_specs(&config) {
                Ok(specs) if specs.is_empty() => {
                    failed = true;
                    println!(
                        "{} No specs matched {:?} under {}",
                        "✗".red(),
                        config.spec_pattern,
                        config.test_dir.display()
                    );
                }
                Ok(specs) => println!("{} {} test specification(s)", "✓".green(), specs.len()),
                Err(e) => {
                    failed = true;
                    println!("{} {:#}", "✗".red(), e);
                }
            }

            if let Some(ref server) = config.web_server {
                match utils::resolve_program(&server.command) {
                    Ok(path) => println!(
                        "{} Dev server command resolves to {}",
                        "✓".green(),
                        path.display()
                    ),
                    Err(e) => {
                        failed = true;
                        println!("{} {:#}", "✗".red(), e);
                    }
                }
            }

            if failed {
                anyhow::bail!("Configuration check failed");
            }
            println!("{} Configuration is ready.", "✓".green().bold());
        }

        Commands::Discover { verify } => {
            let config = RunConfig::resolve(&env);
            let specs = discovery::discover_specs(&config)?;

            for spec in &specs {
                println!("{}", spec.display());
            }
            if verify {
                discovery::verify_specs(&specs)?;
                println!("{} {} spec(s) verified", "✓".green(), specs.len());
            }
        }

        Commands::Serve { no_reuse } => {
            let config = RunConfig::resolve(&env);
            let server_config = match config.web_server {
                Some(mut ws) => {
                    if no_reuse {
                        ws.reuse_existing = false;
                    }
                    ws
                }
                None => anyhow::bail!(
                    "No web server block in CI mode; the service is expected to be running already"
                ),
            };

            let mut server = DevServer::new(server_config);
            server.ensure().await?;

            let stop_flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
            let stop_flag_handler = stop_flag.clone();
            ctrlc::set_handler(move || {
                stop_flag_handler.store(true, std::sync::atomic::Ordering::SeqCst);
            })?;

            println!("  Press Ctrl+C to stop.");
            while !stop_flag.load(std::sync::atomic::Ordering::SeqCst) {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            }
            server.stop().await?;
        }

        Commands::Bootstrap {
            engine,
            no_reuse,
            skip_hooks,
        } => {
            println!(
                "{} Bootstrapping test session ({} mode)",
                "▶".green().bold(),
                if env.ci { "CI".yellow() } else { "local".cyan() }
            );
            if let Some(ref engine) = engine {
                println!("  Engine: {}", engine.cyan());
            }

            let opts = BootstrapOptions {
                engine,
                no_reuse,
                skip_hooks,
            };
            bootstrap::run(&env, &opts).await?;
            println!("{} Session complete.", "✓".green().bold());
        }
    }

    Ok(())
}
