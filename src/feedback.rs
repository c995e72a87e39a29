use crate::rules::{ANIMATION_DURATION_MS, CORRECT_TAP_POINTS, SCORE_POPUP_DURATION_MS};
use std::time::Duration;

/// Highlight on the tile that was just tapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFlash {
    pub tile: usize,
    pub correct: bool,
    pub age: Duration,
}

/// Floating score change next to the score line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorePopup {
    pub delta: i64,
    pub age: Duration,
}

impl ScorePopup {
    pub fn label(&self) -> String {
        if self.delta >= 0 {
            format!("+{}", self.delta)
        } else {
            self.delta.to_string()
        }
    }
}

/// Short-lived visual response to a tap. A new tap replaces whatever is showing.
#[derive(Debug, Clone)]
pub struct Feedback {
    pub flash: Option<TileFlash>,
    pub popup: Option<ScorePopup>,
    flash_for: Duration,
    popup_for: Duration,
}

impl Default for Feedback {
    fn default() -> Self {
        Self {
            flash: None,
            popup: None,
            flash_for: Duration::from_millis(ANIMATION_DURATION_MS),
            popup_for: Duration::from_millis(SCORE_POPUP_DURATION_MS),
        }
    }
}

impl Feedback {
    /// `score_before`/`score_after` give the applied delta, which is smaller
    /// than the penalty when the score was clamped at zero.
    pub fn trigger(&mut self, tile: usize, correct: bool, score_before: u32, score_after: u32) {
        self.flash = Some(TileFlash {
            tile,
            correct,
            age: Duration::ZERO,
        });
        let delta = if correct {
            i64::from(CORRECT_TAP_POINTS)
        } else {
            i64::from(score_after) - i64::from(score_before)
        };
        self.popup = Some(ScorePopup {
            delta,
            age: Duration::ZERO,
        });
    }

    pub fn update(&mut self, dt: Duration) {
        if let Some(flash) = self.flash.as_mut() {
            flash.age += dt;
            if flash.age >= self.flash_for {
                self.flash = None;
            }
        }
        if let Some(popup) = self.popup.as_mut() {
            popup.age += dt;
            if popup.age >= self.popup_for {
                self.popup = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.flash = None;
        self.popup = None;
    }

    pub fn flash_for(&self, tile: usize) -> Option<&TileFlash> {
        self.flash.as_ref().filter(|f| f.tile == tile)
    }
}
