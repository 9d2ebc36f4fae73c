//! Command-line driver.
//!
//! Usage:
//!   bee-holder play --players 4 --seed 7
//!   bee-holder stats --games 1000 --json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bee_holder::core::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
use bee_holder::{run_statistics, run_statistics_sequential, Game, GameStats};

#[derive(Parser, Debug)]
#[command(author, version, about = "Eye of the Bee-Holder trick-taking simulator")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one narrated game.
    Play {
        #[arg(short, long, default_value_t = 4)]
        players: usize,

        /// Seed for a reproducible game.
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Play many silent games and report per-player statistics.
    Stats {
        /// Games per player count.
        #[arg(short, long, default_value_t = 1000)]
        games: usize,

        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Only this player count (default: every count from 2 to 5).
        #[arg(short, long)]
        players: Option<usize>,

        /// Print statistics as JSON.
        #[arg(long)]
        json: bool,

        /// Run on one thread.
        #[arg(long)]
        sequential: bool,
    },
}

/// Shows the play-by-play and batch progress unless `RUST_LOG` says otherwise.
const DEFAULT_FILTER: &str = "info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // Logs on stderr keep `stats --json` output parseable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn play(players: usize, seed: Option<u64>) -> Result<()> {
    let mut config = GameConfig::new(players).verbose();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut game = Game::from_config(config).context("cannot start game")?;
    let winner = game.run();

    println!("{winner} wins with {} tricks", game.tricks_won(winner));
    Ok(())
}

fn stats(games: usize, seed: u64, players: Option<usize>, json: bool, sequential: bool) -> Result<()> {
    let counts: Vec<usize> = match players {
        Some(n) => vec![n],
        None => (MIN_PLAYERS..=MAX_PLAYERS).collect(),
    };

    let mut all: Vec<GameStats> = Vec::with_capacity(counts.len());
    for n in counts {
        let result = if sequential {
            run_statistics_sequential(n, games, seed)
        } else {
            run_statistics(n, games, seed)
        };
        all.push(result.with_context(|| format!("cannot run statistics for {n} players"))?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&all)?);
    } else {
        for stats in &all {
            println!("{stats}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    match args.command.unwrap_or(Command::Play {
        players: 4,
        seed: None,
    }) {
        Command::Play { players, seed } => play(players, seed),
        Command::Stats {
            games,
            seed,
            players,
            json,
            sequential,
        } => stats(games, seed, players, json, sequential),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_default_filter_shows_progress() {
        assert_eq!(EnvFilter::new(DEFAULT_FILTER).max_level_hint(), Some(LevelFilter::INFO));
    }
}
