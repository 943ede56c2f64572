//! High-score table and where it is kept.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

pub const MAX_ENTRIES: usize = 10;
pub const SCORES_KEY: &str = "snake_high_scores";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

/// Best scores, highest first, at most [`MAX_ENTRIES`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScore>,
}

impl HighScores {
    pub fn new() -> Self { Self::default() }

    /// Restores the ordering and cap on a list read from storage.
    pub fn from_entries(mut entries: Vec<HighScore>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.cmp(&b.timestamp)));
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[HighScore] { &self.entries }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn best(&self) -> Option<u32> { self.entries.first().map(|e| e.score) }

    pub fn qualifies(&self, score: u32) -> bool {
        score > 0
            && (self.entries.len() < MAX_ENTRIES
                || self.entries.last().is_some_and(|e| score > e.score))
    }

    /// Inserts a finished game. Returns its 1-based rank if it made the table.
    pub fn record(&mut self, score: u32, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        // after existing entries with the same score
        let pos = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(pos, HighScore { score, timestamp });
        self.entries.truncate(MAX_ENTRIES);
        Some(pos + 1)
    }
}

pub fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

/// Load/save/clear for the high-score table, independent of the medium.
pub trait ScoreStore {
    fn load(&self) -> Result<HighScores>;
    fn save(&mut self, scores: &HighScores) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// Keeps the table in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    saved: Option<HighScores>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<HighScores> { Ok(self.saved.clone().unwrap_or_default()) }

    fn save(&mut self, scores: &HighScores) -> Result<()> {
        self.saved = Some(scores.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.saved = None;
        Ok(())
    }
}

/// One JSON file holding the whole list.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    /// `<dir>/snake_high_scores.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{SCORES_KEY}.json")))
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<HighScores> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no high scores at {}", self.path.display());
                return Ok(HighScores::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        let entries: Vec<HighScore> = serde_json::from_str(&text)
            .with_context(|| format!("parsing high scores in {}", self.path.display()))?;
        Ok(HighScores::from_entries(entries))
    }

    fn save(&mut self, scores: &HighScores) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(scores)?;
        fs::write(&self.path, json).with_context(|| format!("writing {}", self.path.display()))
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}
