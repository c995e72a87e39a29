use crate::session::GameState;

/// How a finished game is rated, by final score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performance {
    Outstanding,
    Excellent,
    Good,
    NotBad,
    KeepPracticing,
}

impl Performance {
    pub fn for_score(score: u32) -> Self {
        match score {
            200.. => Performance::Outstanding,
            150..=199 => Performance::Excellent,
            100..=149 => Performance::Good,
            50..=99 => Performance::NotBad,
            _ => Performance::KeepPracticing,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Performance::Outstanding => "Outstanding! You're a Color Tapping Master!",
            Performance::Excellent => "Excellent! Great reflexes!",
            Performance::Good => "Good job! Keep practicing!",
            Performance::NotBad => "Not bad! Try to improve your accuracy!",
            Performance::KeepPracticing => "Keep practicing! You'll get better!",
        }
    }
}

/// Results shown on the game over screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub final_score: u32,
    pub correct_taps: u32,
    pub wrong_taps: u32,
    pub accuracy: u32,
    pub rounds_played: u32,
    pub performance: Performance,
}

impl From<&GameState> for GameSummary {
    fn from(state: &GameState) -> Self {
        Self {
            final_score: state.score,
            correct_taps: state.correct_taps,
            wrong_taps: state.wrong_taps,
            accuracy: state.accuracy(),
            rounds_played: state.current_round,
            performance: Performance::for_score(state.score),
        }
    }
}
