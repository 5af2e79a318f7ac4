//! Fair Dice CLI
//!
//! Plays one round of non-transitive dice against the computer. Every random
//! choice is made with a commit-reveal exchange the player can audit.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use fairdice_core::dice::{DiceError, DieSet};
use fairdice_core::game::{GameBoard, RoundSummary};
use fairdice_core::protocol::{FairRandomCoordinator, Outcome};
use std::io::Write;
use std::process::ExitCode;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod table;
mod terminal;

use config::{Cli, Config};
use terminal::TerminalPeer;

const USAGE: &str = r#"Usage: fairdice "2,2,4,4,9,9" "6,8,1,1,8,6" "7,5,3,7,5,3""#;
const REQUIREMENTS: &str = "Requirements:
- At least 3 dice configurations required
- Each dice must have exactly 6 comma-separated integers
- All values must be integers";

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from(Cli::parse());

    init_tracing(&config.log_level);
    if !config.color {
        colored::control::set_override(false);
    }

    let input = BufReader::new(tokio::io::stdin());
    let result = run(&config, input, std::io::stdout()).await;

    let (status, message) = report(&result);
    if let Some(message) = message {
        eprintln!("{}", message.red());
    }
    ExitCode::from(status)
}

/// `RUST_LOG` wins over `--log-level`; a bad directive falls back to `warn`
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse the dice and play one round against the player on `input`/`out`
async fn run<R, W>(config: &Config, input: R, out: W) -> Result<Outcome<RoundSummary>>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    let dice = DieSet::parse(&config.dice)?;
    info!(dice = dice.len(), "dice accepted");

    let mut board = GameBoard::new(dice, FairRandomCoordinator::new());
    let mut player = TerminalPeer::new(input, out);

    let outcome = board.play(&mut player).await.context("round aborted")?;
    match &outcome {
        Outcome::Completed(summary) => info!(result = %summary.result, "round complete"),
        Outcome::Cancelled => info!("player exited"),
    }
    Ok(outcome)
}

/// Exit status and the message for stderr.
///
/// A finished or cancelled round exits 0. Invalid dice exit 1 with the usage
/// text; any other failure exits 1 with its error chain.
fn report<T>(result: &Result<T>) -> (u8, Option<String>) {
    match result {
        Ok(_) => (0, None),
        Err(err) if err.downcast_ref::<DiceError>().is_some() => {
            (1, Some(format!("Error: {err}\n{USAGE}\n{REQUIREMENTS}")))
        }
        Err(err) => (1, Some(format!("Error: {err:#}"))),
    }
}
