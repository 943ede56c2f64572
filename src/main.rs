use std::fs::File;
use std::path::Path;
use std::time::Duration;

use grid_snake::config::CONFIG_FILE;
use grid_snake::{Action, App, Cell, Config, Direction, Grid, JsonFileStore, Screen, Settings};
use log::{LevelFilter, error, info, warn};
use macroquad::prelude::*;
use simplelog::WriteLogger;

const FOOD_COLOR: Color = Color::new(0.9, 0.1, 0.1, 1.0);
const HUD_COLOR: Color = Color::new(0.9, 0.9, 0.9, 1.0);
const SPEED_STEP_MS: u64 = 10;

// Cycled on the customize screen
const PALETTE: &[&str] = &["#00ff00", "#008000", "#ffff00", "#00bfff", "#ff8c00", "#ff00ff", "#ffffff"];

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake".to_owned(),
        window_width: 400,
        window_height: 440,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_logging(config: &Config) {
    let level = config.logging.level.parse().unwrap_or(LevelFilter::Info);
    match File::create(&config.logging.path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, simplelog::Config::default(), file) {
                eprintln!("logger already set: {e}");
            }
        }
        Err(e) => eprintln!("cannot open log file {}: {e}", config.logging.path),
    }
}

fn rgb(c: [u8; 3]) -> Color { Color::from_rgba(c[0], c[1], c[2], 255) }

fn next_in_palette(current: &str) -> String {
    let idx = PALETTE.iter().position(|c| *c == current).map_or(0, |i| (i + 1) % PALETTE.len());
    PALETTE[idx].to_string()
}

fn centered(text: &str, y: f32, size: u16, color: Color) {
    let m = measure_text(text, None, size, 1.0);
    draw_text(text, (screen_width() - m.width) * 0.5, y, size as f32, color);
}

fn draw_lines(title: &str, lines: &[String]) {
    let mut y = screen_height() * 0.25;
    centered(title, y, 36, HUD_COLOR);
    y += 48.0;
    for line in lines {
        centered(line, y, 20, GRAY);
        y += 26.0;
    }
}

fn draw_board(app: &App) {
    let Some(game) = app.session() else { return };
    let grid: Grid = app.grid();
    // leave a strip at the bottom for the score
    let sw = screen_width();
    let sh = screen_height() - 40.0;
    let tile = (sw / grid.cols() as f32).min(sh / grid.rows() as f32);
    let off_x = (sw - tile * grid.cols() as f32) * 0.5;
    let off_y = (sh - tile * grid.rows() as f32) * 0.5;
    let cell_rect = |c: Cell| (off_x + c.x as f32 * tile, off_y + c.y as f32 * tile);

    draw_rectangle_lines(off_x, off_y, tile * grid.cols() as f32, tile * grid.rows() as f32, 1.0, DARKGRAY);

    let (fx, fy) = cell_rect(game.food);
    draw_rectangle(fx, fy, tile, tile, FOOD_COLOR);

    let head = rgb(app.settings().head_rgb());
    let body = rgb(app.settings().body_rgb());
    for (i, c) in game.snake.cells().enumerate() {
        let (x, y) = cell_rect(c);
        draw_rectangle(x, y, tile, tile, if i == 0 { head } else { body });
    }

    draw_text(&format!("Score: {}", game.score), 10.0, screen_height() - 12.0, 24.0, HUD_COLOR);
}

fn direction_key() -> Option<Direction> {
    if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
        Some(Direction::Up)
    } else if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
        Some(Direction::Down)
    } else if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
        Some(Direction::Left)
    } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
        Some(Direction::Right)
    } else {
        None
    }
}

/// Keys for the current screen. `None` means leave the program.
fn read_actions(app: &App) -> Option<Vec<Action>> {
    let mut actions = Vec::new();
    let tick_ms = app.settings().tick_ms;
    match app.screen() {
        Screen::Menu => {
            if is_key_pressed(KeyCode::Q) || is_key_pressed(KeyCode::Escape) {
                return None;
            }
            if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::P) {
                actions.push(Action::Play);
            }
            if is_key_pressed(KeyCode::C) {
                actions.push(Action::Customize);
            }
            if is_key_pressed(KeyCode::S) {
                actions.push(Action::AdjustSpeed);
            }
            if is_key_pressed(KeyCode::X) {
                actions.push(Action::ClearScores);
            }
        }
        Screen::Customize => {
            if is_key_pressed(KeyCode::H) {
                actions.push(Action::SetHeadColor(next_in_palette(&app.settings().head_color)));
            }
            if is_key_pressed(KeyCode::B) {
                actions.push(Action::SetBodyColor(next_in_palette(&app.settings().body_color)));
            }
            if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Escape) {
                actions.push(Action::Back);
            }
        }
        Screen::Settings => {
            if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::Minus) {
                actions.push(Action::SetSpeed(tick_ms.saturating_sub(SPEED_STEP_MS)));
            }
            if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::Equal) {
                actions.push(Action::SetSpeed(tick_ms + SPEED_STEP_MS));
            }
            if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Escape) {
                actions.push(Action::Back);
            }
        }
        Screen::Playing => {
            if let Some(dir) = direction_key() {
                actions.push(Action::Turn(dir));
            }
            if is_key_pressed(KeyCode::LeftBracket) {
                actions.push(Action::SetSpeed(tick_ms + SPEED_STEP_MS));
            }
            if is_key_pressed(KeyCode::RightBracket) {
                actions.push(Action::SetSpeed(tick_ms.saturating_sub(SPEED_STEP_MS)));
            }
            if is_key_pressed(KeyCode::Escape) {
                actions.push(Action::Quit);
            }
        }
        Screen::GameOver { .. } => {
            if is_key_pressed(KeyCode::R) || is_key_pressed(KeyCode::Enter) {
                actions.push(Action::PlayAgain);
            }
            if is_key_pressed(KeyCode::M) || is_key_pressed(KeyCode::Escape) {
                actions.push(Action::ToMenu);
            }
        }
    }
    Some(actions)
}

fn draw_screen(app: &App) {
    match app.screen() {
        Screen::Menu => {
            let mut lines = vec![
                "Enter: Play".to_string(),
                "C: Customize".to_string(),
                "S: Adjust speed".to_string(),
                "X: Clear high scores".to_string(),
                "Q: Quit".to_string(),
            ];
            let scores = app.scores();
            if !scores.is_empty() {
                lines.push(String::new());
                lines.extend(
                    scores.entries().iter().take(5).enumerate().map(|(i, e)| format!("{}. {}", i + 1, e.score)),
                );
            }
            draw_lines("SNAKE", &lines);
        }
        Screen::Customize => {
            let s = app.settings();
            draw_lines(
                "CUSTOMIZE",
                &[
                    format!("H: Head colour {}", s.head_color),
                    format!("B: Body colour {}", s.body_color),
                    "Enter/Esc: Back".to_string(),
                ],
            );
            let y = screen_height() * 0.75;
            draw_rectangle(screen_width() * 0.5 - 30.0, y, 20.0, 20.0, rgb(s.head_rgb()));
            draw_rectangle(screen_width() * 0.5 - 10.0, y, 40.0, 20.0, rgb(s.body_rgb()));
        }
        Screen::Settings => {
            draw_lines(
                "SPEED",
                &[
                    format!("Tick: {} ms", app.settings().tick_ms),
                    "Left/Right or -/+ : Adjust".to_string(),
                    "Enter/Esc: Back".to_string(),
                ],
            );
        }
        Screen::Playing => draw_board(app),
        Screen::GameOver { score, rank } => {
            draw_board(app);
            draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, 0.6));
            let mut lines = vec![format!("Score: {score}")];
            if let Some(rank) = rank {
                lines.push(format!("New high score! #{rank}"));
            }
            lines.push("R: Play again  M: Menu".to_string());
            draw_lines("GAME OVER", &lines);
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::load_or_default(CONFIG_FILE);
    init_logging(&config);
    info!("starting");

    let first_run = Settings { tick_ms: config.game.tick_ms, ..Settings::default() };
    let settings = if Path::new(&config.storage.settings_path).exists() {
        Settings::load(&config.storage.settings_path).unwrap_or_else(|e| {
            warn!("using default settings: {e:#}");
            first_run
        })
    } else {
        first_run
    };
    let settings_path = config.storage.settings_path.clone();
    let store = Box::new(JsonFileStore::new(&config.storage.scores_path));
    let mut app = match App::new(config, settings, store) {
        Ok(app) => app.with_settings_path(settings_path),
        Err(e) => {
            error!("bad configuration: {e:#}");
            eprintln!("bad configuration: {e:#}");
            return;
        }
    };

    loop {
        let Some(actions) = read_actions(&app) else { break };
        for action in actions {
            app.handle(action);
        }
        app.update(Duration::from_secs_f32(get_frame_time().max(0.0)));

        clear_background(BLACK);
        draw_screen(&app);

        next_frame().await;
    }
    info!("exiting");
}
