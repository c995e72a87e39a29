//! Host-side state: screens, input handling and the glue between the
//! session, its clock and the rendered board. Kept free of terminal I/O so
//! it can be driven headless.

use crate::board::{tile_for_key, Board};
use crate::clock::GameClock;
use crate::config::Config;
use crate::feedback::Feedback;
use crate::session::{GameSession, GameState};
use crate::summary::GameSummary;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::layout::Rect;
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub session: GameSession,
    pub clock: GameClock,
    pub board: Board,
    pub feedback: Feedback,
    pub screen: Screen,
    pub summary: Option<GameSummary>,
    pub settings: Config,
    settings_changed: bool,
    snapshots: Receiver<GameState>,
    was_active: bool,
    rng: StdRng,
}

impl App {
    /// `seed` makes target picks and board layouts reproducible
    pub fn new(settings: Config, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = GameSession::with_rng(StdRng::seed_from_u64(rng.gen()));
        let snapshots = session.subscribe();
        let board = Board::shuffled(&mut rng);

        Self {
            session,
            clock: GameClock::default(),
            board,
            feedback: Feedback::default(),
            screen: Screen::Start,
            summary: None,
            settings,
            settings_changed: false,
            snapshots,
            was_active: false,
            rng,
        }
    }

    pub fn start_game(&mut self) {
        self.session.start();
        self.enter_play();
    }

    pub fn restart_game(&mut self) {
        self.session.restart();
        self.enter_play();
    }

    fn enter_play(&mut self) {
        self.clock.arm();
        self.feedback.clear();
        self.summary = None;
        self.screen = Screen::Playing;
        self.drain_snapshots();
    }

    /// Abandon the running game and go back to the start screen
    pub fn stop_game(&mut self) {
        self.session.stop();
        self.clock.disarm();
        self.feedback.clear();
        self.screen = Screen::Start;
        self.drain_snapshots();
    }

    /// Feed elapsed wall time to the clock and animations
    pub fn advance(&mut self, dt: Duration) {
        self.clock.advance(dt, &mut self.session);
        self.feedback.update(dt);
        self.drain_snapshots();
    }

    /// Tap the tile at `index`. Returns whether it matched, or None if the
    /// tap was ignored.
    pub fn tap_tile(&mut self, index: usize) -> Option<bool> {
        if self.screen != Screen::Playing || !self.session.is_active() {
            return None;
        }
        let color = self.board.color_at(index)?;
        let before = self.session.score();
        let correct = self.session.tap(color);
        self.feedback.trigger(index, correct, before, self.session.score());
        self.drain_snapshots();
        Some(correct)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        match self.screen {
            Screen::Start => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.start_game(),
                KeyCode::Char('l') => self.toggle_labels(),
                KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
                _ => {}
            },
            Screen::Playing => match key.code {
                KeyCode::Esc => self.stop_game(),
                KeyCode::Char(c) => {
                    if let Some(index) = tile_for_key(c) {
                        self.tap_tile(index);
                    }
                }
                _ => {}
            },
            Screen::GameOver => match key.code {
                KeyCode::Char('r') => self.restart_game(),
                KeyCode::Char('m') | KeyCode::Backspace => self.screen = Screen::Start,
                KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
                _ => {}
            },
        }
        Control::Continue
    }

    /// Mouse press at a terminal cell, with `area` the full frame
    pub fn handle_click(&mut self, area: Rect, column: u16, row: u16) {
        match self.screen {
            Screen::Playing => {
                if let Some(index) = crate::ui::layout::tile_at(area, column, row) {
                    self.tap_tile(index);
                }
            }
            Screen::Start => self.start_game(),
            Screen::GameOver => {}
        }
    }

    pub fn toggle_labels(&mut self) {
        self.settings.tile_labels = !self.settings.tile_labels;
        self.settings_changed = true;
    }

    /// True once after the settings were changed, so the caller can persist them
    pub fn take_settings_changed(&mut self) -> bool {
        std::mem::take(&mut self.settings_changed)
    }

    /// Apply every snapshot published since the last call: recolor the
    /// board and switch to the summary when the clock ran out.
    fn drain_snapshots(&mut self) {
        while let Ok(state) = self.snapshots.try_recv() {
            self.board.shuffle(&mut self.rng);
            if self.was_active && state.is_game_over() {
                let summary = GameSummary::from(&state);
                info!(
                    score = summary.final_score,
                    accuracy = summary.accuracy,
                    "game over"
                );
                self.summary = Some(summary);
                self.clock.disarm();
                self.feedback.clear();
                self.screen = Screen::GameOver;
            }
            self.was_active = state.is_active;
        }
    }
}
