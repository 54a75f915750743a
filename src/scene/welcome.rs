//! Attract screen: title, player prompt and score advance table

use std::rc::Rc;

use super::state::{State, StateKind};
use crate::assets::SpriteSheet;
use crate::assets::regions::{self, Region};
use crate::consts::*;
use crate::entity::text::{BLINK_FOREVER, DEFAULT_BLINK_INTERVAL_TICKS};
use crate::entity::{Drawable, Layer, SpriteEntity, TextEntity};
use crate::input::{KeyCode, Keyboard, Subscription};
use crate::session::{PlayerCount, Session};
use crate::surface::{Surface, TextAlign};

const PROMPT: &str = "prompt";

/// Score advance table rows, top to bottom
const ADVANCE_TABLE: [(&str, Region, &str); 4] = [
    ("saucer", regions::SAUCER, "=? MYSTERY"),
    ("squid", regions::SQUID, "=30 POINTS"),
    ("crab", regions::CRAB, "=20 POINTS"),
    ("octopus", regions::OCTOPUS, "=10 POINTS"),
];

pub struct WelcomeState {
    layer: Layer,
    keys: Option<Subscription>,
}

impl WelcomeState {
    pub fn new(sheet: &Rc<SpriteSheet>) -> Self {
        let center = SCREEN_WIDTH / 2.0;
        let mut layer = Layer::new();

        layer.insert(
            "title",
            TextEntity::new("SPACE INVADERS", center, 80.0).with_align(TextAlign::Center),
        );
        layer.insert(
            PROMPT,
            TextEntity::new("PUSH 1 OR 2 PLAYERS BUTTON", center, 104.0)
                .with_align(TextAlign::Center)
                .with_fill_style(GREEN)
                .with_blink(BLINK_FOREVER, DEFAULT_BLINK_INTERVAL_TICKS),
        );
        layer.insert(
            "table_caption",
            TextEntity::new("*SCORE ADVANCE TABLE*", center, 136.0).with_align(TextAlign::Center),
        );

        for (row, (name, region, points)) in ADVANCE_TABLE.iter().enumerate() {
            let y = 152.0 + row as f64 * 16.0;
            let (_, _, w, _) = *region;
            // Right-align sprites of different widths against the caption column
            let x = 80.0 - f64::from(w);
            layer.insert(*name, SpriteEntity::from_region(sheet, *region, x, y));
            layer.insert(
                format!("{}_points", name),
                TextEntity::new(*points, 84.0, y + 8.0),
            );
        }

        Self { layer, keys: None }
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    fn handle_key(&mut self, key: KeyCode, session: &mut Session) {
        let count = match key {
            KeyCode::DIGIT_1 => PlayerCount::One,
            KeyCode::DIGIT_2 => PlayerCount::Two,
            _ => return,
        };
        session.player_count = count;
        log::info!("Player count set to {}", count.as_number());
    }
}

impl State for WelcomeState {
    fn kind(&self) -> StateKind {
        StateKind::Welcome
    }

    fn enter(&mut self, keyboard: &Keyboard) {
        self.keys = Some(keyboard.subscribe());
        if let Some(prompt) = self.layer.text_mut(PROMPT) {
            prompt.blink();
        }
    }

    fn exit(&mut self) {
        self.keys = None;
        if let Some(prompt) = self.layer.text_mut(PROMPT) {
            prompt.stop_blink();
        }
    }

    fn update(&mut self, dt: f64, session: &mut Session) {
        let pressed = self.keys.as_ref().map(Subscription::drain).unwrap_or_default();
        for key in pressed {
            self.handle_key(key, session);
        }
        self.layer.update(dt);
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.layer.render(surface);
    }
}
