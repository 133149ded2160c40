//! # score-cli
//!
//! Operator console for the scorelink cricket scoreboard.
//!
//! ## Commands
//!
//! - `new`: Start an innings (optionally chasing a target)
//! - `score`: Apply one scoring command
//! - `status`: Show the current score and rates
//! - `export`: Print the current score frame for the peer
//! - `import`: Apply a score frame received from the peer
//!
//! ## Example
//!
//! ```bash
//! # Second innings, chasing 181 in 20 overs
//! scoreboard new --target 181 --target-overs 20
//!
//! # A single, a wide, then undo the wide
//! scoreboard score run
//! scoreboard score extra
//! scoreboard score extra --mode minus
//!
//! # Hand the score to the other unit
//! scoreboard export
//! scoreboard --config secondary.toml import <HEX>
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{export, import, new, score, status};
use config::Config;
use score_core::{Command as ScoreCommand, Mode, Overs};

/// Operator console for the scorelink cricket scoreboard.
#[derive(Parser, Debug)]
#[command(name = "scoreboard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Data directory holding the match file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Node configuration file (default: <data-dir>/scoreboard.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a new innings, replacing any match in progress
    New {
        /// Runs required to win (second innings)
        #[arg(long)]
        target: Option<u16>,

        /// Overs allowed for the chase
        #[arg(long, default_value = "0")]
        target_overs: u8,

        /// Extra balls allowed for the chase (0-5)
        #[arg(long, default_value = "0")]
        target_balls: u8,
    },

    /// Apply a scoring command
    Score {
        /// run, extra (wide, no-ball), leg-bye, wicket, dot, ball,
        /// target-runs or target-balls
        command: ScoreCommand,

        /// normal | plus | minus
        #[arg(long, short, default_value = "normal")]
        mode: Mode,

        /// Treat an extra as a repeated press correcting the same event
        /// (extra only)
        #[arg(long)]
        repeat: bool,
    },

    /// Show the current score
    Status,

    /// Print the current score frame as hex
    Export,

    /// Apply a hex-encoded frame received from the peer
    Import {
        /// Frame bytes as hex
        frame: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Determine data directory
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir)
        .await
        .context("Failed to create data directory")?;

    let config_path = cli
        .config
        .unwrap_or_else(|| data_dir.join("scoreboard.toml"));
    let config = Config::load_or_default(&config_path)?;
    tracing::debug!(role = ?config.node.role, "loaded configuration");

    match cli.command {
        Commands::New {
            target,
            target_overs,
            target_balls,
        } => {
            let chase = match target {
                Some(runs) => {
                    let deadline = Overs::new(target_overs, target_balls).ok_or_else(|| {
                        anyhow::anyhow!("--target-balls must be 0-5, got {}", target_balls)
                    })?;
                    Some((runs, deadline))
                }
                None => None,
            };
            new::run(&data_dir, chase).await?;
        }
        Commands::Score {
            command,
            mode,
            repeat,
        } => {
            score::run(&data_dir, &config, command, mode, repeat).await?;
        }
        Commands::Status => {
            status::run(&data_dir).await?;
        }
        Commands::Export => {
            export::run(&data_dir, &config).await?;
        }
        Commands::Import { frame } => {
            import::run(&data_dir, &config, &frame).await?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Get the default data directory for the scoreboard.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("io", "scorelink", "scoreboard")
        .context("Could not determine home directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
