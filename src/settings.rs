use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::warn;
use serde::{Deserialize, Serialize};

/// Player choices from the customize and speed screens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_head_color")]
    pub head_color: String,
    #[serde(default = "default_body_color")]
    pub body_color: String,
}

fn default_tick_ms() -> u64 { 100 }
fn default_head_color() -> String { "#00ff00".to_string() }
fn default_body_color() -> String { "#008000".to_string() }

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            head_color: default_head_color(),
            body_color: default_body_color(),
        }
    }
}

/// Parses `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Result<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("not a #rrggbb colour: {s:?}");
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

impl Settings {
    pub fn set_head_color(&mut self, value: &str) -> Result<()> {
        parse_hex_color(value)?;
        self.head_color = normalize(value);
        Ok(())
    }

    pub fn set_body_color(&mut self, value: &str) -> Result<()> {
        parse_hex_color(value)?;
        self.body_color = normalize(value);
        Ok(())
    }

    pub fn head_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.head_color).unwrap_or([0, 255, 0])
    }

    pub fn body_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.body_color).unwrap_or([0, 128, 0])
    }

    /// Missing file gives defaults; unreadable or corrupt files are errors.
    /// Colours that do not parse are reset to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if let Err(e) = parse_hex_color(&self.head_color) {
            warn!("head colour reset: {e:#}");
            self.head_color = default_head_color();
        }
        if let Err(e) = parse_hex_color(&self.body_color) {
            warn!("body colour reset: {e:#}");
            self.body_color = default_body_color();
        }
        self
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }
}

fn normalize(value: &str) -> String {
    format!("#{}", value.trim().trim_start_matches('#').to_ascii_lowercase())
}
