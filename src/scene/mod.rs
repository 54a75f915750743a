//! Scene: the HUD plus whichever screen state is live
//!
//! The HUD (score captions and values) is always drawn. Everything else on
//! screen belongs to the live `State`, which the scene swaps with
//! `set_state`, always running `exit` on the old state and `enter` on the
//! new one.

pub mod playing;
pub mod state;
pub mod welcome;

pub use playing::PlayingState;
pub use state::{State, StateKind};
pub use welcome::WelcomeState;

use thiserror::Error;

use crate::consts::*;
use crate::entity::{Drawable, Layer, TextEntity};
use crate::input::Keyboard;
use crate::score::to_score_string;
use crate::session::{PlayerCount, Session};
use crate::surface::{Surface, TextAlign};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    #[error("scene has no live state")]
    NoActiveState,
}

/// HUD entity names
pub mod hud {
    pub const SCORE1_CAPTION: &str = "score1_caption";
    pub const HI_SCORE_CAPTION: &str = "hi_score_caption";
    pub const SCORE2_CAPTION: &str = "score2_caption";
    pub const SCORE1: &str = "score1";
    pub const HI_SCORE: &str = "hi_score";
    pub const SCORE2: &str = "score2";
}

/// Build the six always-visible score texts
fn build_hud() -> Layer {
    let left = 8.0;
    let center = SCREEN_WIDTH / 2.0;
    let right = SCREEN_WIDTH - 8.0;

    let mut layer = Layer::new();
    layer.insert(
        hud::SCORE1_CAPTION,
        TextEntity::new("SCORE<1>", left, HUD_CAPTION_Y).with_align(TextAlign::Left),
    );
    layer.insert(
        hud::HI_SCORE_CAPTION,
        TextEntity::new("HI-SCORE", center, HUD_CAPTION_Y).with_align(TextAlign::Center),
    );
    layer.insert(
        hud::SCORE2_CAPTION,
        TextEntity::new("SCORE<2>", right, HUD_CAPTION_Y).with_align(TextAlign::Right),
    );
    layer.insert(
        hud::SCORE1,
        TextEntity::new("", left + 16.0, HUD_VALUE_Y).with_align(TextAlign::Left),
    );
    layer.insert(
        hud::HI_SCORE,
        TextEntity::new("", center, HUD_VALUE_Y).with_align(TextAlign::Center),
    );
    layer.insert(
        hud::SCORE2,
        TextEntity::new("", right - 16.0, HUD_VALUE_Y).with_align(TextAlign::Right),
    );
    layer
}

pub struct Scene {
    hud: Layer,
    state: Option<Box<dyn State>>,
    keyboard: Keyboard,
}

impl Scene {
    pub fn new(keyboard: Keyboard) -> Self {
        Self {
            hud: build_hud(),
            state: None,
            keyboard,
        }
    }

    pub fn hud(&self) -> &Layer {
        &self.hud
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn state_kind(&self) -> Option<StateKind> {
        self.state.as_ref().map(|s| s.kind())
    }

    /// Replace the live state: old `exit`, assign, new `enter`
    ///
    /// Runs both hooks even when `next` is the same kind as the live state.
    pub fn set_state(&mut self, next: Option<Box<dyn State>>) {
        if let Some(previous) = self.state.as_mut() {
            previous.exit();
        }
        let from = self.state_kind();
        self.state = next;
        let to = self.state_kind();
        log::info!(
            "State {} -> {}",
            from.map_or("none", |k| k.as_str()),
            to.map_or("none", |k| k.as_str())
        );
        if let Some(current) = self.state.as_mut() {
            current.enter(&self.keyboard);
        }
    }

    /// One fixed step: refresh and update the HUD, then the live state
    pub fn update(&mut self, dt: f64, session: &mut Session) -> Result<(), SceneError> {
        let Some(state) = self.state.as_mut() else {
            return Err(SceneError::NoActiveState);
        };

        let values = [
            (hud::SCORE1, session.player1_score),
            (hud::HI_SCORE, session.hi_score),
            (hud::SCORE2, session.player2_score),
        ];
        for (name, score) in values {
            if let Some(text) = self.hud.text_mut(name) {
                text.set_text(to_score_string(&score));
            }
        }
        if let Some(text) = self.hud.text_mut(hud::SCORE2) {
            text.set_visible(session.player_count == PlayerCount::Two);
        }

        self.hud.update(dt);
        state.update(dt, session);
        Ok(())
    }

    /// HUD first, then the live state paints over it
    pub fn render(&self, surface: &mut dyn Surface) {
        self.hud.render(surface);
        if let Some(state) = self.state.as_ref() {
            state.render(surface);
        }
    }
}
