//! Persisted application settings. Every field carries a serde default so
//! old or hand-edited settings files keep loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::canvas::surface::Color;
use crate::canvas::Tool;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    #[serde(default = "default_max_layers")]
    pub max_layers: usize,
    #[serde(default = "default_tool")]
    pub default_tool: Tool,
    #[serde(default = "default_color")]
    pub default_color: Color,
    #[serde(default = "default_width")]
    pub default_width: u32,
    #[serde(default = "default_quick_colors")]
    pub quick_colors: Vec<Color>,
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default = "default_window_size")]
    pub window_size: (f32, f32),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            max_layers: default_max_layers(),
            default_tool: default_tool(),
            default_color: default_color(),
            default_width: default_width(),
            quick_colors: default_quick_colors(),
            debug_logging: false,
            window_size: default_window_size(),
        }
    }
}

impl Settings {
    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(error) => {
                    warn!(%error, path = %path.display(), "settings file is malformed, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw = serde_json::to_string_pretty(self).context("serialize settings")?;
        fs::write(path, raw).with_context(|| format!("write settings {}", path.display()))?;
        Ok(())
    }
}

fn default_canvas_width() -> u32 {
    960
}

fn default_canvas_height() -> u32 {
    600
}

fn default_max_layers() -> usize {
    10
}

fn default_tool() -> Tool {
    Tool::Pen
}

fn default_color() -> Color {
    Color::BLACK
}

fn default_width() -> u32 {
    2
}

fn default_quick_colors() -> Vec<Color> {
    vec![
        Color::BLACK,
        Color::WHITE,
        Color::rgb(230, 25, 25),
        Color::rgb(25, 150, 40),
        Color::rgb(30, 60, 220),
        Color::rgb(240, 200, 20),
        Color::rgb(240, 130, 20),
        Color::rgb(150, 40, 180),
    ]
}

fn default_window_size() -> (f32, f32) {
    (1280.0, 760.0)
}
