//! Terminal presentation layer.
//!
//! Renders session events on stdout and turns typed lines into session
//! commands.

use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strictly_niya::{
    ControlMode, Layout, NiyaConfig, Outcome, Player, SearchExecutor, Session, SessionCommand,
    SessionEvent,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

const HELP: &str = "Enter a move as 'row col', 'restart', 'restart random', 'restart <16 tiles>' or 'quit'.";

/// Parses a typed line into a command.
pub fn parse_input(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match word.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Some(SessionCommand::Quit),
        "restart" => {
            let rest = rest.trim();
            let layout = match rest {
                "" => Some(Layout::classic().ids().to_vec()),
                "random" => None,
                // Unparseable layouts are passed through empty so the session
                // falls back to a random one.
                text => Some(
                    Layout::parse(text)
                        .map(|layout| layout.ids().to_vec())
                        .unwrap_or_default(),
                ),
            };
            Some(SessionCommand::Restart { layout })
        }
        _ => {
            let numbers: Vec<usize> = line
                .split(|c: char| c == ',' || c.is_whitespace() || c == '(' || c == ')')
                .filter(|part| !part.is_empty())
                .map(str::parse)
                .collect::<Result<_, _>>()
                .ok()?;
            match numbers[..] {
                [row, col] => Some(SessionCommand::Submit { row, col }),
                _ => None,
            }
        }
    }
}

/// Renders an event as text.
pub fn render(event: &SessionEvent) -> String {
    match event {
        SessionEvent::TurnStarted {
            state,
            player,
            mode,
        } => {
            let prompt = if *mode == ControlMode::Human {
                format!("{} to move ({})", player, HELP)
            } else {
                format!("{} ({}) is thinking...", player, mode)
            };
            format!("\n{}\n{}", state.display(), prompt)
        }
        SessionEvent::MovePlayed {
            player,
            position,
            tile,
        } => format!("{} claims {}: {}", player, position, tile),
        SessionEvent::MoveRejected { position, error } => match position {
            Some(position) => format!("Move {} rejected: {}", position, error),
            None => format!("Move rejected: {}", error),
        },
        SessionEvent::Finished { state, outcome } => format!(
            "\n{}\n{} after {} moves. Type 'restart' or 'quit'.",
            state.display(),
            outcome,
            state.moves_made()
        ),
    }
}

/// Layout from the config, or a random one.
fn initial_layout<R: Rng + ?Sized>(config: &NiyaConfig, rng: &mut R) -> Result<Layout> {
    Ok(match config.parsed_layout()? {
        Some(layout) => layout,
        None => Layout::random(rng),
    })
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Runs an interactive game on stdin and stdout.
#[instrument(skip(config))]
pub async fn play(config: &NiyaConfig) -> Result<()> {
    let mut rng = seeded_rng(*config.seed());
    let layout = initial_layout(config, &mut rng)?;

    let (executor, replies) = SearchExecutor::channel(*config.seed());
    let (event_tx, mut events) = mpsc::unbounded_channel();
    let (commands, command_rx) = mpsc::unbounded_channel();
    let session = Session::new(*config.red(), *config.black(), layout, executor, event_tx)
        .with_seed(rng.random());
    let handle = tokio::spawn(session.run(command_rx, replies));

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => println!("{}", render(&event)),
                None => break,
            },
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    debug!("Stdin closed");
                    let _ = commands.send(SessionCommand::Quit);
                    break;
                };
                match parse_input(&line) {
                    Some(SessionCommand::Quit) => {
                        let _ = commands.send(SessionCommand::Quit);
                        break;
                    }
                    Some(command) => commands
                        .send(command)
                        .context("Session stopped unexpectedly")?,
                    None if line.trim().is_empty() => {}
                    None => println!("{}", HELP),
                }
            }
        }
    }

    handle.await.context("Session task failed")?;
    Ok(())
}

/// Tally of finished games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Games won by Red.
    pub red: u32,
    /// Games won by Black.
    pub black: u32,
    /// Tied games.
    pub ties: u32,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Player::Red) => self.red += 1,
            Outcome::Winner(Player::Black) => self.black += 1,
            Outcome::Tie => self.ties += 1,
        }
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RED {} - BLACK {} - ties {}", self.red, self.black, self.ties)
    }
}

/// Plays `games` engine-only games and returns the tally.
#[instrument(skip(config))]
pub async fn duel(config: &NiyaConfig, games: u32) -> Result<Tally> {
    if !config.red().is_engine() || !config.black().is_engine() {
        bail!("Duels need engine control modes (strong or random) for both players");
    }

    let mut rng = seeded_rng(*config.seed());
    let mut tally = Tally::default();
    for game in 0..games {
        let layout = initial_layout(config, &mut rng)?;
        let (executor, replies) = SearchExecutor::channel(Some(rng.random()));
        let (event_tx, mut events) = mpsc::unbounded_channel();
        let (commands, command_rx) = mpsc::unbounded_channel();
        let session = Session::new(*config.red(), *config.black(), layout, executor, event_tx);
        let handle = tokio::spawn(session.run(command_rx, replies));

        let outcome = loop {
            match events.recv().await {
                Some(SessionEvent::Finished { outcome, .. }) => break outcome,
                Some(_) => {}
                None => bail!("Session ended before the game finished"),
            }
        };
        let _ = commands.send(SessionCommand::Quit);
        handle.await.context("Session task failed")?;

        info!(game, %outcome, "Duel game finished");
        println!("Game {}: {}", game + 1, outcome);
        tally.record(outcome);
    }
    Ok(tally)
}
