//! Game configuration
//!
//! Read once at startup. Every field is optional in the JSON; missing fields
//! fall back to the defaults below.

use serde::Deserialize;

use crate::clock::FrameClock;
use crate::consts::{FPS_STEP_MS, MIN_STEP_MS, STUTTER_THRESHOLD_MS};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// DOM id of the `<canvas>` to draw on
    pub canvas_id: String,
    /// URL of the sprite sheet image
    pub sprite_sheet: String,
    /// Fixed simulation step (ms)
    pub step_ms: f64,
    /// Frame gaps at or above this are dropped (ms)
    pub stutter_threshold_ms: f64,
    /// One of error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            sprite_sheet: "img/sprites.png".to_string(),
            step_ms: FPS_STEP_MS,
            stutter_threshold_ms: STUTTER_THRESHOLD_MS,
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// DOM id of the optional inline JSON config
    pub const ELEMENT_ID: &'static str = "game-config";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid game config ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Clock using the configured timing
    ///
    /// A step below `MIN_STEP_MS` or not below the threshold, and a threshold
    /// that isn't positive, fall back to the defaults.
    pub fn clock(&self) -> FrameClock {
        let configured = self.stutter_threshold_ms;
        let threshold = if configured > 0.0 && configured.is_finite() {
            configured
        } else {
            log::warn!("Ignoring stutter threshold {} ms", self.stutter_threshold_ms);
            STUTTER_THRESHOLD_MS
        };
        let step = if self.step_ms >= MIN_STEP_MS && self.step_ms < threshold {
            self.step_ms
        } else {
            log::warn!("Ignoring step {} ms", self.step_ms);
            FPS_STEP_MS.min(threshold / 2.0).max(MIN_STEP_MS)
        };
        FrameClock::new(step, threshold)
    }
}
