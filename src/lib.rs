//! Space Invaders - an arcade front end for the HTML canvas
//!
//! Core modules:
//! - `clock`: Fixed timestep accumulator
//! - `game`: Root context, init/run/start lifecycle
//! - `scene`: HUD and the screen state machine
//! - `entity`: Text and sprite drawables
//! - `surface`: 2D drawing abstraction
//! - `platform`: Browser bindings (canvas, keyboard, animation frames)

pub mod assets;
pub mod clock;
pub mod entity;
pub mod game;
pub mod input;
pub mod platform;
pub mod scene;
pub mod score;
pub mod session;
pub mod settings;
pub mod surface;

pub use clock::{FrameAdvance, FrameClock};
pub use game::{FrameScheduler, Game, InitError, SurfaceProvider};
pub use scene::{Scene, SceneError, State, StateKind};
pub use score::to_score_string;
pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step in milliseconds (60 Hz)
    pub const FPS_STEP_MS: f64 = 1000.0 / 60.0;
    /// Frame gaps at or above this are dropped without updating or drawing
    pub const STUTTER_THRESHOLD_MS: f64 = 100.0;
    /// Smallest step the clock accepts
    pub const MIN_STEP_MS: f64 = 1.0;

    /// Arcade resolution; the canvas is scaled up with CSS
    pub const SCREEN_WIDTH: f64 = 224.0;
    pub const SCREEN_HEIGHT: f64 = 256.0;

    /// HUD baselines
    pub const HUD_CAPTION_Y: f64 = 16.0;
    pub const HUD_VALUE_Y: f64 = 32.0;

    pub const FONT: &str = "8px 'Press Start 2P', monospace";
    pub const WHITE: &str = "#ffffff";
    pub const GREEN: &str = "#20ff20";
}
