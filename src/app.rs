//! Screen flow around a game session: menu, customize, speed settings,
//! playing and game over. Everything here is window-free; the binary maps
//! keys to [`Action`]s and draws whatever [`App::screen`] says.

use std::path::PathBuf;
use std::time::Duration;

use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::TickClock;
use crate::config::Config;
use crate::engine::{GameState, TickEvent};
use crate::grid::{Direction, Grid};
use crate::input::InputQueue;
use crate::scores::{HighScores, ScoreStore, unix_now};
use crate::settings::Settings;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Customize,
    Settings,
    Playing,
    GameOver { score: u32, rank: Option<usize> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Play,
    PlayAgain,
    Customize,
    AdjustSpeed,
    Quit,
    Back,
    ToMenu,
    Turn(Direction),
    SetSpeed(u64),
    SetHeadColor(String),
    SetBodyColor(String),
    ClearScores,
}

pub struct App {
    config: Config,
    grid: Grid,
    settings: Settings,
    settings_path: Option<PathBuf>,
    store: Box<dyn ScoreStore>,
    scores: HighScores,
    screen: Screen,
    session: Option<GameState>,
    clock: TickClock,
    input: InputQueue,
    rng: StdRng,
}

impl App {
    pub fn new(config: Config, mut settings: Settings, store: Box<dyn ScoreStore>) -> anyhow::Result<Self> {
        let grid = config.grid()?;
        settings.tick_ms = config.clamp_tick_ms(settings.tick_ms);
        let scores = store.load().unwrap_or_else(|e| {
            warn!("starting with an empty high-score table: {e:#}");
            HighScores::new()
        });
        let rng = match config.game.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let clock = TickClock::new(Duration::from_millis(settings.tick_ms))
            .with_max_catch_up(config.game.max_catch_up);
        Ok(Self {
            config,
            grid,
            settings,
            settings_path: None,
            store,
            scores,
            screen: Screen::Menu,
            session: None,
            clock,
            input: InputQueue::new(),
            rng,
        })
    }

    /// Persist settings to `path` whenever the player leaves a settings screen.
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    pub fn screen(&self) -> Screen { self.screen }
    pub fn session(&self) -> Option<&GameState> { self.session.as_ref() }
    pub fn settings(&self) -> &Settings { &self.settings }
    pub fn scores(&self) -> &HighScores { &self.scores }
    pub fn grid(&self) -> Grid { self.grid }
    pub fn clock(&self) -> &TickClock { &self.clock }

    pub fn handle(&mut self, action: Action) {
        match (self.screen, action) {
            (Screen::Menu, Action::Play) | (Screen::GameOver { .. }, Action::PlayAgain) => {
                self.start_game();
            }
            (Screen::Menu, Action::Customize) => self.go(Screen::Customize),
            (Screen::Menu, Action::AdjustSpeed) => self.go(Screen::Settings),
            (Screen::Menu, Action::ClearScores) => self.clear_scores(),
            (Screen::Playing, Action::Quit) => {
                self.session = None;
                self.input.clear();
                self.go(Screen::Menu);
            }
            (Screen::Playing, Action::Turn(dir)) => {
                if let Some(game) = &self.session {
                    self.input.push(dir, game.direction);
                }
            }
            (Screen::Customize | Screen::Settings, Action::Back) => {
                self.save_settings();
                self.go(Screen::Menu);
            }
            (Screen::GameOver { .. }, Action::ToMenu) => {
                self.session = None;
                self.go(Screen::Menu);
            }
            (_, Action::SetSpeed(ms)) => {
                self.settings.tick_ms = self.config.clamp_tick_ms(ms);
                self.clock.set_interval(Duration::from_millis(self.settings.tick_ms));
                debug!("tick interval now {} ms", self.settings.tick_ms);
            }
            (Screen::Customize, Action::SetHeadColor(c)) => {
                if let Err(e) = self.settings.set_head_color(&c) {
                    warn!("{e:#}");
                }
            }
            (Screen::Customize, Action::SetBodyColor(c)) => {
                if let Err(e) = self.settings.set_body_color(&c) {
                    warn!("{e:#}");
                }
            }
            (screen, action) => debug!("ignoring {action:?} on {screen:?}"),
        }
    }

    /// Feeds frame time to the clock and runs every tick that is due.
    pub fn update(&mut self, dt: Duration) -> Vec<TickEvent> {
        if self.screen != Screen::Playing {
            return Vec::new();
        }
        let due = self.clock.advance(dt);
        let mut events = Vec::with_capacity(due as usize);
        for _ in 0..due {
            let Some(game) = self.session.as_mut() else { break };
            if let Some(dir) = self.input.pop() {
                game.steer(dir);
            }
            let event = game.advance(&mut self.rng);
            events.push(event);
            if let TickEvent::Died { cause } = event {
                let score = game.score;
                info!("game over ({cause:?}) with score {score}");
                self.finish(score);
                break;
            }
        }
        events
    }

    fn start_game(&mut self) {
        let game = GameState::with_food_budget(
            self.grid,
            self.config.grid.boundary,
            self.config.game.food_attempts,
            &mut self.rng,
        );
        self.session = Some(game);
        self.input.clear();
        self.clock.set_interval(Duration::from_millis(self.settings.tick_ms));
        self.clock.reset();
        self.go(Screen::Playing);
    }

    fn finish(&mut self, score: u32) {
        let rank = self.scores.record(score, unix_now());
        if let Some(rank) = rank {
            info!("new high score #{rank}: {score}");
            if let Err(e) = self.store.save(&self.scores) {
                error!("could not save high scores: {e:#}");
            }
        }
        self.go(Screen::GameOver { score, rank });
    }

    fn clear_scores(&mut self) {
        self.scores = HighScores::new();
        if let Err(e) = self.store.clear() {
            error!("could not clear high scores: {e:#}");
        }
        info!("high scores cleared");
    }

    fn save_settings(&self) {
        if let Some(path) = &self.settings_path
            && let Err(e) = self.settings.save(path)
        {
            error!("could not save settings: {e:#}");
        }
    }

    fn go(&mut self, screen: Screen) {
        debug!("{:?} -> {:?}", self.screen, screen);
        self.screen = screen;
    }
}
