pub mod app;
pub mod clock;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod input;
pub mod scores;
pub mod settings;
pub mod snake;

pub use app::{Action, App, Screen};
pub use clock::TickClock;
pub use config::Config;
pub use engine::{DeathCause, GameState, TickEvent};
pub use grid::{Boundary, Cell, Direction, Grid};
pub use input::InputQueue;
pub use scores::{HighScore, HighScores, JsonFileStore, MemoryStore, ScoreStore};
pub use settings::Settings;
pub use snake::Snake;
