use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use grid_snake::{Action, App, Config, HighScores, JsonFileStore, Screen, ScoreStore, Settings};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("grid_snake_{}_{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn json_store_saves_loads_and_clears() {
    let dir = scratch("store");
    let mut store = JsonFileStore::in_dir(&dir);
    assert!(store.path().ends_with("snake_high_scores.json"));
    assert!(store.load().unwrap().is_empty());

    let mut scores = HighScores::new();
    scores.record(7, 1_700_000_000);
    scores.record(12, 1_700_000_100);
    store.save(&scores).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, scores);
    assert_eq!(loaded.best(), Some(12));

    store.clear().unwrap();
    assert!(!store.path().exists());
    assert!(store.load().unwrap().is_empty());
    // clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = scratch("corrupt");
    let store = JsonFileStore::in_dir(&dir);
    fs::write(store.path(), "{ not json").unwrap();
    assert!(store.load().is_err());
}

#[test]
fn unsorted_file_is_normalised_on_load() {
    let dir = scratch("unsorted");
    let store = JsonFileStore::in_dir(&dir);
    let raw: Vec<String> = (1..=12).map(|s| format!(r#"{{"score":{s},"timestamp":{s}}}"#)).collect();
    fs::write(store.path(), format!("[{}]", raw.join(","))).unwrap();

    let loaded = store.load().unwrap();
    let scores: Vec<u32> = loaded.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, (3..=12u32).rev().collect::<Vec<_>>());
}

#[test]
fn settings_round_trip_through_file() {
    let dir = scratch("settings");
    let path = dir.join("settings.json");
    assert_eq!(Settings::load(&path).unwrap(), Settings::default());

    let mut s = Settings::default();
    s.tick_ms = 150;
    s.set_head_color("#FFAA00").unwrap();
    s.save(&path).unwrap();
    assert_eq!(Settings::load(&path).unwrap(), s);
}

/// A walled board with a fixed seed runs into the right wall within a few
/// ticks; the finished game must land in the persisted table.
#[test]
fn finished_game_is_recorded() {
    let dir = scratch("session");
    let config = Config::parse("[grid]\nboundary = \"walls\"\n[game]\nseed = 3").unwrap();
    let store = JsonFileStore::in_dir(&dir);
    let mut app = App::new(config, Settings::default(), Box::new(store.clone()))
        .unwrap()
        .with_settings_path(dir.join("settings.json"));

    app.handle(Action::Play);
    for _ in 0..100 {
        app.update(Duration::from_millis(100));
        if matches!(app.screen(), Screen::GameOver { .. }) {
            break;
        }
    }

    let Screen::GameOver { score, rank } = app.screen() else {
        panic!("game did not end: {:?}", app.screen());
    };
    let saved = store.load().unwrap();
    if score > 0 {
        assert_eq!(rank, Some(1));
        assert_eq!(saved.best(), Some(score));
    } else {
        assert_eq!(rank, None);
        assert!(saved.is_empty());
    }

    app.handle(Action::ToMenu);
    assert_eq!(app.screen(), Screen::Menu);
    app.handle(Action::ClearScores);
    assert!(app.scores().is_empty());
    assert!(store.load().unwrap().is_empty());

    app.handle(Action::AdjustSpeed);
    app.handle(Action::SetSpeed(120));
    app.handle(Action::Back);
    assert_eq!(Settings::load(dir.join("settings.json")).unwrap().tick_ms, 120);
}
