//! In-memory user registry CLI.
//!
//! Replays JSON-lines action scripts (register, login, logout, list, ...)
//! against a fresh registry and prints one JSON report per step.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use roster::app::AppState;
use roster::exit_codes;
use roster::io::config::{DEFAULT_CONFIG_PATH, RosterConfig, load_config, write_config};
use roster::io::script::load_script;
use roster::logging;
use roster::replay::replay;
use tracing::info;

#[derive(Parser)]
#[command(name = "roster", version, about = "In-memory user registry and session core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a JSON-lines action script and print one JSON report per step.
    Run {
        /// Path to the script file.
        script: PathBuf,
        /// Config file (defaults apply when missing).
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Write a default config file if missing.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
    /// Load and validate a config file.
    CheckConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run { script, config } => cmd_run(&script, &config),
        Command::InitConfig { force, path } => cmd_init_config(&path, force),
        Command::CheckConfig { path } => cmd_check_config(&path),
    }
}

fn cmd_run(script: &Path, config_path: &Path) -> Result<()> {
    let config = load_config(config_path).context("load config")?;
    let steps = load_script(script)?;
    info!(steps = steps.len(), policy = ?config.registry.duplicate_emails, "replaying script");

    let mut app = AppState::new(config.registry.duplicate_emails);
    for report in replay(&mut app, steps)? {
        println!("{}", serde_json::to_string(&report).context("serialize report")?);
    }
    Ok(())
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        return Ok(());
    }
    write_config(path, &RosterConfig::default())
}

fn cmd_check_config(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("config {} not found", path.display());
    }
    let config = load_config(path)?;
    println!(
        "ok: duplicate_emails={:?} server={}:{}",
        config.registry.duplicate_emails, config.server.bind, config.server.port
    );
    Ok(())
}
