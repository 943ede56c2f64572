use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use log::{info, warn};
use serde::Deserialize;

use crate::grid::{Boundary, Grid};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    #[serde(default)]
    pub boundary: Boundary,
}

#[derive(Debug, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_min_tick_ms")]
    pub min_tick_ms: u64,
    #[serde(default = "default_max_tick_ms")]
    pub max_tick_ms: u64,
    #[serde(default = "default_food_attempts")]
    pub food_attempts: u32,
    #[serde(default = "default_max_catch_up")]
    pub max_catch_up: u32,
    /// Fixed RNG seed; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_scores_path")]
    pub scores_path: String,
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_path")]
    pub path: String,
}

fn default_canvas_width() -> u32 { 400 }
fn default_canvas_height() -> u32 { 400 }
fn default_cell_size() -> u32 { 20 }
fn default_tick_ms() -> u64 { 100 }
fn default_min_tick_ms() -> u64 { 50 }
fn default_max_tick_ms() -> u64 { 500 }
fn default_food_attempts() -> u32 { crate::food::DEFAULT_MAX_ATTEMPTS }
fn default_max_catch_up() -> u32 { crate::clock::DEFAULT_MAX_CATCH_UP }
fn default_scores_path() -> String { format!("{}.json", crate::scores::SCORES_KEY) }
fn default_settings_path() -> String { "snake_settings.json".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_log_path() -> String { "grid_snake.log".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            cell_size: default_cell_size(),
            boundary: Boundary::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            min_tick_ms: default_min_tick_ms(),
            max_tick_ms: default_max_tick_ms(),
            food_attempts: default_food_attempts(),
            max_catch_up: default_max_catch_up(),
            seed: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { scores_path: default_scores_path(), settings_path: default_settings_path() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), path: default_log_path() }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("parsing configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Missing file means defaults; a broken one is reported and replaced by defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => match Self::parse(&text) {
                Ok(config) => {
                    info!("loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("ignoring {}: {e:#}", path.display());
                    Config::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
            Err(e) => {
                warn!("cannot read {}: {e}", path.display());
                Config::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        self.grid()?;
        let g = &self.game;
        ensure!(g.min_tick_ms > 0, "min_tick_ms must be positive");
        ensure!(
            g.min_tick_ms <= g.tick_ms && g.tick_ms <= g.max_tick_ms,
            "tick_ms {} outside [{}, {}]",
            g.tick_ms,
            g.min_tick_ms,
            g.max_tick_ms
        );
        ensure!(g.max_catch_up > 0, "max_catch_up must be positive");
        ensure!(g.food_attempts > 0, "food_attempts must be positive");
        Ok(())
    }

    pub fn grid(&self) -> Result<Grid> {
        Grid::from_canvas(self.grid.canvas_width, self.grid.canvas_height, self.grid.cell_size)
    }

    pub fn clamp_tick_ms(&self, ms: u64) -> u64 {
        ms.clamp(self.game.min_tick_ms, self.game.max_tick_ms)
    }
}
