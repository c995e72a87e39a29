//! The game session state machine.
//!
//! A [`GameSession`] owns the authoritative [`GameState`] and is the only
//! thing allowed to mutate it. Hosts observe it either by polling the query
//! methods or by holding a receiver from [`GameSession::subscribe`], which
//! yields a snapshot after every state-changing call.

use crate::palette::{random_color, random_color_except, TileColor, PALETTE};
use crate::rules::{CORRECT_TAP_POINTS, TIME_LIMIT_SECS, WRONG_TAP_PENALTY};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inactive,
    Active,
}

/// Snapshot of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub time_left: u32,
    pub is_active: bool,
    pub target_color: TileColor,
    pub current_round: u32,
    pub correct_taps: u32,
    pub wrong_taps: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            time_left: TIME_LIMIT_SECS,
            is_active: false,
            target_color: PALETTE[0],
            current_round: 1,
            correct_taps: 0,
            wrong_taps: 0,
        }
    }
}

impl GameState {
    pub fn phase(&self) -> Phase {
        if self.is_active {
            Phase::Active
        } else {
            Phase::Inactive
        }
    }

    /// Inactive with the clock run down. Explicit stops leave time on the
    /// clock and do not count.
    pub fn is_game_over(&self) -> bool {
        !self.is_active && self.time_left == 0
    }

    pub fn tap_stats(&self) -> TapStats {
        TapStats {
            correct: self.correct_taps,
            wrong: self.wrong_taps,
        }
    }

    pub fn accuracy(&self) -> u32 {
        self.tap_stats().accuracy()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TapStats {
    pub correct: u32,
    pub wrong: u32,
}

impl TapStats {
    pub fn total(&self) -> u64 {
        u64::from(self.correct) + u64::from(self.wrong)
    }

    /// Percentage of correct taps, truncated; 0 when nothing was tapped
    pub fn accuracy(&self) -> u32 {
        match self.total() {
            0 => 0,
            total => (u64::from(self.correct) * 100 / total) as u32,
        }
    }
}

pub struct GameSession<R: Rng = StdRng> {
    state: GameState,
    rng: R,
    subscribers: Vec<Sender<GameState>>,
}

impl GameSession<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameSession<StdRng> {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> std::fmt::Debug for GameSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<R: Rng> GameSession<R> {
    /// A session in the inactive default state, drawing colors from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: GameState::default(),
            rng,
            subscribers: Vec::new(),
        }
    }

    /// Register for snapshots. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<GameState> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self) {
        let snapshot = self.state.clone();
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    pub fn start(&mut self) {
        self.state = GameState {
            score: 0,
            time_left: TIME_LIMIT_SECS,
            is_active: true,
            target_color: random_color(&mut self.rng),
            current_round: 1,
            correct_taps: 0,
            wrong_taps: 0,
        };
        info!(target_color = %self.state.target_color, "session started");
        self.publish();
    }

    pub fn stop(&mut self) {
        if !self.state.is_active {
            return;
        }
        self.state.is_active = false;
        info!(
            score = self.state.score,
            time_left = self.state.time_left,
            correct = self.state.correct_taps,
            wrong = self.state.wrong_taps,
            "session stopped"
        );
        self.publish();
    }

    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    /// Count down one second. Returns whether the session is still active.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_active {
            return false;
        }
        self.state.time_left = self.state.time_left.saturating_sub(1);
        debug!(time_left = self.state.time_left, "tick");
        if self.state.time_left == 0 {
            // stop() publishes the final snapshot
            self.stop();
            return false;
        }
        self.publish();
        true
    }

    pub fn change_target(&mut self) {
        if !self.state.is_active {
            return;
        }
        self.rotate_target();
        self.publish();
    }

    fn rotate_target(&mut self) {
        let previous = self.state.target_color;
        self.state.target_color = random_color_except(&mut self.rng, previous);
        debug!(from = %previous, to = %self.state.target_color, "target changed");
    }

    /// Score a tap on `color`. Returns whether it matched the target.
    pub fn tap(&mut self, color: TileColor) -> bool {
        if !self.state.is_active {
            return false;
        }
        let correct = color == self.state.target_color;
        if correct {
            self.state.score = self.state.score.saturating_add(CORRECT_TAP_POINTS);
            self.state.correct_taps = self.state.correct_taps.saturating_add(1);
        } else {
            self.state.score = self.state.score.saturating_sub(WRONG_TAP_PENALTY);
            self.state.wrong_taps = self.state.wrong_taps.saturating_add(1);
        }
        debug!(%color, correct, score = self.state.score, "tap");
        self.publish();
        correct
    }

    /// Advance to the next round with a fresh clock and a new target.
    /// Nothing in the game loop calls this; rounds stay at 1 in normal play.
    pub fn start_new_round(&mut self) {
        if !self.state.is_active {
            return;
        }
        self.state.current_round += 1;
        self.state.time_left = TIME_LIMIT_SECS;
        self.rotate_target();
        info!(round = self.state.current_round, "new round");
        self.publish();
    }

    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn time_left(&self) -> u32 {
        self.state.time_left
    }

    pub fn target_color(&self) -> TileColor {
        self.state.target_color
    }

    pub fn round(&self) -> u32 {
        self.state.current_round
    }

    pub fn tap_stats(&self) -> TapStats {
        self.state.tap_stats()
    }

    pub fn accuracy(&self) -> u32 {
        self.state.accuracy()
    }
}
