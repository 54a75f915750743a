//! Gameplay screen
//!
//! Lays out the invader formation, the player's cannon and the start banner.
//! Nothing moves yet.

use std::rc::Rc;

use super::state::{State, StateKind};
use crate::assets::SpriteSheet;
use crate::assets::regions::{self, Region};
use crate::consts::*;
use crate::entity::{Drawable, Layer, SpriteEntity, TextEntity};
use crate::input::Keyboard;
use crate::session::Session;
use crate::surface::{Surface, TextAlign};

pub const FORMATION_ROWS: usize = 5;
pub const FORMATION_COLUMNS: usize = 11;

/// Banner flips on enter (ends visible)
const BANNER_BLINKS: i32 = 10;
const BANNER_BLINK_TICKS: i32 = 10;

const BANNER: &str = "banner";

/// Invader kind per formation row, top to bottom
const ROW_KINDS: [Region; FORMATION_ROWS] = [
    regions::SQUID,
    regions::CRAB,
    regions::CRAB,
    regions::OCTOPUS,
    regions::OCTOPUS,
];

const FORMATION_LEFT: f64 = 24.0;
const FORMATION_TOP: f64 = 64.0;
const CELL_WIDTH: f64 = 16.0;
const CELL_HEIGHT: f64 = 16.0;

pub struct PlayingState {
    layer: Layer,
}

impl PlayingState {
    pub fn new(sheet: &Rc<SpriteSheet>) -> Self {
        let mut layer = Layer::new();

        layer.insert(
            BANNER,
            TextEntity::new("PLAY PLAYER<1>", SCREEN_WIDTH / 2.0, 48.0)
                .with_align(TextAlign::Center)
                .with_blink(BANNER_BLINKS, BANNER_BLINK_TICKS),
        );

        for (row, region) in ROW_KINDS.iter().enumerate() {
            let (_, _, w, _) = *region;
            // Center each sprite in a 12px-wide column
            let offset = (12.0 - f64::from(w)) / 2.0;
            for col in 0..FORMATION_COLUMNS {
                let x = FORMATION_LEFT + col as f64 * CELL_WIDTH + offset;
                let y = FORMATION_TOP + row as f64 * CELL_HEIGHT;
                layer.insert(
                    format!("invader_{}_{}", row, col),
                    SpriteEntity::from_region(sheet, *region, x, y),
                );
            }
        }

        layer.insert(
            "cannon",
            SpriteEntity::from_region(sheet, regions::CANNON, FORMATION_LEFT, 216.0),
        );
        layer.insert(
            "credit",
            TextEntity::new("CREDIT 00", SCREEN_WIDTH - 8.0, SCREEN_HEIGHT - 8.0)
                .with_align(TextAlign::Right),
        );

        Self { layer }
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }
}

impl State for PlayingState {
    fn kind(&self) -> StateKind {
        StateKind::Playing
    }

    fn enter(&mut self, _keyboard: &Keyboard) {
        if let Some(banner) = self.layer.text_mut(BANNER) {
            banner.blink();
        }
    }

    fn exit(&mut self) {
        if let Some(banner) = self.layer.text_mut(BANNER) {
            banner.stop_blink();
        }
    }

    fn update(&mut self, dt: f64, _session: &mut Session) {
        self.layer.update(dt);
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.layer.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_formation_is_full() {
        let sheet = Rc::new(SpriteSheet::new("sprites.png"));
        sheet.mark_ready();
        let state = PlayingState::new(&sheet);

        let mut surface = RecordingSurface::new();
        state.render(&mut surface);
        // Formation plus the cannon
        assert_eq!(surface.image_count(), FORMATION_ROWS * FORMATION_COLUMNS + 1);
        assert_eq!(surface.texts(), vec!["PLAY PLAYER<1>", "CREDIT 00"]);
    }

    #[test]
    fn test_banner_blinks_then_settles_visible() {
        let sheet = Rc::new(SpriteSheet::new("sprites.png"));
        let mut state = PlayingState::new(&sheet);
        let mut session = Session::new();
        state.enter(&Keyboard::new());

        state.update(FPS_STEP_MS, &mut session);
        assert_eq!(state.layer().text(BANNER).unwrap().blinks_remaining(), BANNER_BLINKS);

        for _ in 0..(BANNER_BLINKS * BANNER_BLINK_TICKS) {
            state.update(FPS_STEP_MS, &mut session);
        }
        let banner = state.layer().text(BANNER).unwrap();
        assert_eq!(banner.blinks_remaining(), 0);
        assert!(banner.is_visible());
    }
}
