//! Application configuration.
//!
//! The configuration is loaded from
//! `$XDG_CONFIG_HOME/hyprpill/config.json`.  The top-level schema uses an
//! `"overlay"` key so the file can be extended with additional sections
//! later without breaking backward compatibility.
//!
//! # Example
//!
//! ```json
//! {
//!   "overlay": {
//!     "display_ms": 1500,
//!     "debounce_ms": 100,
//!     "margin_bottom": 40
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional — a minimal `{}` file is valid and all
/// sections fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Overlay timing and geometry settings.
    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// Overlay timing and geometry settings.
///
/// Durations are in **milliseconds**, lengths in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// How long the pill stays fully visible after the last trigger (ms).
    pub display_ms: u64,
    /// Duration of the fade-in animation (ms).
    pub fade_in_ms: u64,
    /// Duration of the fade-out animation (ms).
    pub fade_out_ms: u64,
    /// Window for coalescing rapid workspace switches (ms).
    pub debounce_ms: u64,
    /// Distance from the bottom screen edge (px).
    pub margin_bottom: i32,
    /// Centre-to-centre distance between dots (px).
    pub dot_spacing: f64,
    /// Horizontal pill padding (px).
    pub pad_h: f64,
    /// Vertical pill padding (px).
    pub pad_v: f64,
    /// Radius of an occupied dot (px).  Empty dots render 1 px smaller,
    /// the active dot uses [`active_dot_radius`](Self::active_dot_radius).
    pub dot_radius: f64,
    /// Radius of the active-workspace dot (px).
    pub active_dot_radius: f64,
    /// Workspace slots that are always shown, occupied or not.
    pub persistent_slots: usize,
    /// Hard cap on shown slots; higher workspace ids are never tracked.
    pub max_slots: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            display_ms: 1200,
            fade_in_ms: 150,
            fade_out_ms: 300,
            debounce_ms: 80,
            margin_bottom: 60,
            dot_spacing: 20.0,
            pad_h: 24.0,
            pad_v: 14.0,
            dot_radius: 4.0,
            active_dot_radius: 5.5,
            persistent_slots: 5,
            max_slots: 10,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
