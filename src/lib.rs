// Library surface for the game core, the headless host and integration tests.
// The core (rules, palette, session, clock) has no terminal dependencies.
pub mod app;
pub mod app_dirs;
pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod palette;
pub mod rules;
pub mod runtime;
pub mod session;
pub mod summary;
pub mod ui;

pub use palette::TileColor;
pub use session::{GameSession, GameState, Phase};
