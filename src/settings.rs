//! Game settings and tunables
//!
//! Defaults reproduce the stock game. A JSON file can override any subset
//! of fields; a missing or broken file silently falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical viewport the maze is centered in (pixels)
    pub viewport_width: i32,
    pub viewport_height: i32,
    /// Tile edge length in pixels
    pub tile_size: i32,

    /// Marble radius in pixels
    pub marble_radius: f64,
    /// Velocity retained per tick (1.0 = frictionless)
    pub friction: f64,

    /// Fraction of floor cells converted to speed tiles on generation
    pub special_tile_density: f64,
    /// Impulse per tick while a tilt key is held
    pub key_tilt_force: f64,

    /// Fixed base seed for maze generation; None picks one at random per
    /// session
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            tile_size: TILE_SIZE,
            marble_radius: MARBLE_RADIUS,
            friction: MARBLE_FRICTION,
            special_tile_density: SPECIAL_TILE_DENSITY,
            key_tilt_force: KEY_TILT_FORCE,
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults on any
    /// failure (missing file, bad JSON)
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Best-effort save; failure is logged, never fatal
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("Failed to save settings to {}: {err}", path.display());
                } else {
                    log::info!("Settings saved to {}", path.display());
                }
            }
            Err(err) => log::warn!("Failed to serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_game() {
        let settings = Settings::default();
        assert_eq!(settings.tile_size, 32);
        assert_eq!(settings.marble_radius, 15.0);
        assert_eq!(settings.friction, 0.98);
        assert_eq!(settings.special_tile_density, 0.15);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_partial_json_overrides() {
        let settings: Settings = serde_json::from_str(r#"{"tile_size": 16, "seed": 99}"#).unwrap();
        assert_eq!(settings.tile_size, 16);
        assert_eq!(settings.seed, Some(99));
        // Untouched fields keep their defaults
        assert_eq!(settings.friction, 0.98);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/tilt-maze.json"));
        assert_eq!(settings.viewport_width, 1280);
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut settings = Settings::default();
        settings.seed = Some(7);
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(7));
        assert_eq!(back.key_tilt_force, settings.key_tilt_force);
    }
}
