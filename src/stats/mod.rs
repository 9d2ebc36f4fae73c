//! Batch statistics over many independent games.
//!
//! Games never see a `GameStats`; the driver records each finished game's
//! `GameOutcome` after the fact. Per-game RNGs are derived from the base
//! seed and the game index, so parallel and sequential runs agree.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{ConfigError, GameConfig, GameRng, PlayerId, PlayerMap};
use crate::game::{Game, GameOutcome};

/// Progress is logged every this many finished games.
const PROGRESS_INTERVAL: usize = 100;

/// Per-player counters accumulated across games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub games_played: u32,
    pub wins: PlayerMap<u32>,
    pub tricks: PlayerMap<u32>,
    pub two_streaks: PlayerMap<u32>,
    pub three_streaks: PlayerMap<u32>,
    pub sudden_deaths: u32,
    pub hands_played: u64,
}

impl GameStats {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            games_played: 0,
            wins: PlayerMap::with_value(player_count, 0),
            tricks: PlayerMap::with_value(player_count, 0),
            two_streaks: PlayerMap::with_value(player_count, 0),
            three_streaks: PlayerMap::with_value(player_count, 0),
            sudden_deaths: 0,
            hands_played: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.wins.player_count()
    }

    /// Add one finished game.
    pub fn record(&mut self, outcome: &GameOutcome) {
        assert_eq!(
            outcome.player_count(),
            self.player_count(),
            "outcome player count does not match stats"
        );

        self.games_played += 1;
        self.wins[outcome.winner] += 1;
        for player in self.wins.player_ids() {
            self.tricks[player] += outcome.tricks[player];
            self.two_streaks[player] += outcome.two_streaks[player];
            self.three_streaks[player] += outcome.three_streaks[player];
        }
        self.sudden_deaths += u32::from(outcome.sudden_death);
        self.hands_played += u64::from(outcome.hands_played);
    }

    /// Fold another batch into this one.
    pub fn merge(&mut self, other: &GameStats) {
        assert_eq!(other.player_count(), self.player_count(), "cannot merge stats for different tables");

        self.games_played += other.games_played;
        for player in self.wins.player_ids() {
            self.wins[player] += other.wins[player];
            self.tricks[player] += other.tricks[player];
            self.two_streaks[player] += other.two_streaks[player];
            self.three_streaks[player] += other.three_streaks[player];
        }
        self.sudden_deaths += other.sudden_deaths;
        self.hands_played += other.hands_played;
    }

    #[must_use]
    pub fn total_tricks(&self) -> u64 {
        self.tricks.values().map(|&t| u64::from(t)).sum()
    }

    /// Percentage of games won by `player`.
    #[must_use]
    pub fn win_rate(&self, player: PlayerId) -> f64 {
        percentage(u64::from(self.wins[player]), u64::from(self.games_played))
    }

    /// Percentage of all tricks won by `player`.
    #[must_use]
    pub fn trick_share(&self, player: PlayerId) -> f64 {
        percentage(u64::from(self.tricks[player]), self.total_tricks())
    }

    #[must_use]
    pub fn average_hands(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.hands_played as f64 / f64::from(self.games_played)
        }
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

impl std::fmt::Display for GameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "=== STATISTICS FOR {}-PLAYER GAMES ({} games) ===",
            self.player_count(),
            self.games_played
        )?;

        writeln!(f, "\nGame Wins by Player:")?;
        for player in self.wins.player_ids() {
            writeln!(f, "  {player}: {} wins ({:.1}%)", self.wins[player], self.win_rate(player))?;
        }

        writeln!(f, "\nTotal Tricks Won by Player:")?;
        for player in self.wins.player_ids() {
            writeln!(f, "  {player}: {} tricks ({:.1}%)", self.tricks[player], self.trick_share(player))?;
        }

        writeln!(f, "\n2+ Trick Winning Streaks:")?;
        for player in self.wins.player_ids() {
            writeln!(f, "  {player}: {} streaks", self.two_streaks[player])?;
        }

        writeln!(f, "\n3+ Trick Winning Streaks:")?;
        for player in self.wins.player_ids() {
            writeln!(f, "  {player}: {} streaks", self.three_streaks[player])?;
        }

        writeln!(
            f,
            "\nSudden death: {} games, {:.2} hands per game",
            self.sudden_deaths,
            self.average_hands()
        )
    }
}

fn play_one(config: &GameConfig, base: &GameRng, index: usize) -> GameOutcome {
    let mut game = match Game::new(config.clone(), base.for_game(index as u64)) {
        Ok(game) => game,
        Err(err) => unreachable!("config validated before the batch: {err}"),
    };
    game.run();
    match game.outcome() {
        Some(outcome) => outcome,
        None => unreachable!("run returns only once the game is over"),
    }
}

fn report_progress(done: &AtomicUsize, games: usize) {
    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
    if finished % PROGRESS_INTERVAL == 0 {
        info!("  Completed {finished}/{games} games");
    }
}

/// Play `games` silent games across the rayon pool.
pub fn run_statistics(player_count: usize, games: usize, seed: u64) -> Result<GameStats, ConfigError> {
    let config = GameConfig::new(player_count);
    config.validate()?;
    let base = GameRng::new(seed);
    let done = AtomicUsize::new(0);

    info!("Running {games} games with {player_count} players...");

    let stats = (0..games)
        .into_par_iter()
        .map(|index| {
            let outcome = play_one(&config, &base, index);
            report_progress(&done, games);
            outcome
        })
        .fold(
            || GameStats::new(player_count),
            |mut stats, outcome| {
                stats.record(&outcome);
                stats
            },
        )
        .reduce(
            || GameStats::new(player_count),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    Ok(stats)
}

/// Same as [`run_statistics`] on the calling thread.
pub fn run_statistics_sequential(player_count: usize, games: usize, seed: u64) -> Result<GameStats, ConfigError> {
    let config = GameConfig::new(player_count);
    config.validate()?;
    let base = GameRng::new(seed);
    let done = AtomicUsize::new(0);

    info!("Running {games} games with {player_count} players...");

    let mut stats = GameStats::new(player_count);
    for index in 0..games {
        stats.record(&play_one(&config, &base, index));
        report_progress(&done, games);
    }
    Ok(stats)
}
