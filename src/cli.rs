//! Command-line interface for strictly_niya.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_niya::ControlMode;

/// Strictly Niya - the Niya tile game against a perfect-play engine
#[derive(Parser, Debug)]
#[command(name = "strictly_niya")]
#[command(about = "Play Niya in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game
    Play {
        /// Control mode for Red (human, strong, random)
        #[arg(long)]
        red: Option<ControlMode>,

        /// Control mode for Black (human, strong, random)
        #[arg(long)]
        black: Option<ControlMode>,

        /// Tile identities or plant:poem pairs in board order
        #[arg(long)]
        layout: Option<String>,

        /// Seed for random layouts and casual moves
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play engine against engine and print the tally
    Duel {
        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Control mode for Red (strong or random)
        #[arg(long, default_value = "random")]
        red: ControlMode,

        /// Control mode for Black (strong or random)
        #[arg(long, default_value = "strong")]
        black: ControlMode,

        /// Fixed layout for every game (random per game otherwise)
        #[arg(long)]
        layout: Option<String>,

        /// Seed for random layouts and casual moves
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Replay moves on a layout and show the strong move
    Analyze {
        /// Tile identities or plant:poem pairs in board order
        #[arg(long)]
        layout: String,

        /// Moves to replay, e.g. "0,1 1,1 2,0"
        #[arg(long, default_value = "")]
        moves: String,
    },
}
