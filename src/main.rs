//! Strictly Niya - Unified CLI
//!
//! Interactive play, engine duels and position analysis.

#![warn(missing_docs)]

mod cli;
mod console;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use strictly_niya::{Layout, NiyaConfig, Position, State, evaluate};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => NiyaConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => NiyaConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            red,
            black,
            layout,
            seed,
        } => {
            let config = config
                .with_modes(red, black)
                .with_layout(layout)
                .with_seed(seed);
            info!(red = %config.red(), black = %config.black(), "Starting interactive game");
            console::play(&config).await
        }
        Command::Duel {
            games,
            red,
            black,
            layout,
            seed,
        } => {
            let config = config
                .with_modes(Some(red), Some(black))
                .with_layout(layout)
                .with_seed(seed);
            let tally = console::duel(&config, games).await?;
            println!("{}", tally);
            Ok(())
        }
        Command::Analyze { layout, moves } => analyze(&layout, &moves).await,
    }
}

/// Replays `moves` on `layout` and prints the position with the strong move.
#[instrument]
async fn analyze(layout: &str, moves: &str) -> Result<()> {
    let layout = Layout::parse(layout).context("Invalid layout")?;
    let mut state = State::new(layout);
    for token in moves.split_whitespace() {
        let Some(position) = Position::parse(token) else {
            bail!("Cannot parse move '{}'", token);
        };
        state
            .apply_move(position)
            .with_context(|| format!("Move {} is not legal here", position))?;
    }

    println!("{}", state.display());
    if let Some(outcome) = state.outcome() {
        println!("{}", outcome);
        return Ok(());
    }

    let player = state.current_player();
    let snapshot = state.clone();
    let outcome = tokio::task::spawn_blocking(move || evaluate(player, &snapshot))
        .await
        .context("Search task failed")??;
    println!(
        "{} to move. Strong move: {} (value {}, {} positions searched)",
        player, outcome.position, outcome.value, outcome.nodes
    );
    Ok(())
}
