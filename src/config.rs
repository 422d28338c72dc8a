use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PaintError, PaintResult};
use crate::font::FontChoice;
use crate::raster::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::state::DrawingState;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "raster_paint.json";

/// Startup settings. Read once; nothing is written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct PaintConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// RGB
    pub background: [u8; 3],
    /// RGB
    pub brush_color: [u8; 3],
    pub stroke_width: u32,
    pub font: FontChoice,
    pub font_size: u32,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_WIDTH,
            canvas_height: DEFAULT_HEIGHT,
            background: [255, 255, 255],
            brush_color: [0, 0, 0],
            stroke_width: 5,
            font: FontChoice::Proportional,
            font_size: 20,
        }
    }
}

impl PaintConfig {
    pub fn from_json(json: &str) -> PaintResult<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.canvas_width = config.canvas_width.max(1);
        config.canvas_height = config.canvas_height.max(1);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> PaintResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|err| PaintError::io(path, err))?;
        Self::from_json(&json)
    }

    /// Read `path` if it exists; any problem falls back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b] = self.background;
        Color32::from_rgb(r, g, b)
    }

    pub fn brush_color(&self) -> Color32 {
        let [r, g, b] = self.brush_color;
        Color32::from_rgb(r, g, b)
    }

    /// Tool settings the controller starts with.
    pub fn initial_state(&self) -> DrawingState {
        DrawingState::default()
            .with_colors(self.brush_color(), self.background_color())
            .with_stroke_width(self.stroke_width)
            .with_font(self.font, self.font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PaintConfig::from_json(r#"{ "stroke_width": 9, "font": "Monospace" }"#).unwrap();
        assert_eq!(config.stroke_width, 9);
        assert_eq!(config.font, FontChoice::Monospace);
        assert_eq!(config.canvas_width, DEFAULT_WIDTH);
        assert_eq!(config.background_color(), Color32::WHITE);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let result = PaintConfig::from_json("{ not json");
        assert!(matches!(result, Err(PaintError::Config(_))));
    }

    #[test]
    fn test_zero_canvas_size_is_bumped() {
        let config = PaintConfig::from_json(r#"{ "canvas_width": 0 }"#).unwrap();
        assert_eq!(config.canvas_width, 1);
    }

    #[test]
    fn test_initial_state_clamps_values() {
        let config = PaintConfig {
            stroke_width: 500,
            brush_color: [200, 0, 0],
            ..PaintConfig::default()
        };
        let state = config.initial_state();
        assert_eq!(state.stroke_width(), 20);
        assert_eq!(state.brush_color(), Color32::from_rgb(200, 0, 0));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("raster_paint_no_such_config.json");
        assert_eq!(PaintConfig::load_or_default(&path), PaintConfig::default());
    }
}
