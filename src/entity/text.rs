//! Text entity with optional counted blinking

use super::{Drawable, Entity};
use crate::surface::{Surface, TextAlign, TextStyle};

/// Blink forever
pub const BLINK_FOREVER: i32 = -1;

/// Default ticks between visibility flips (half a second at 60 Hz)
pub const DEFAULT_BLINK_INTERVAL_TICKS: i32 = 30;

/// Countdown state for a blinking text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkState {
    /// Flips left; `-1` blinks forever, `0` is idle
    pub remaining: i32,
    /// Update calls until the next flip
    pub timer: i32,
    /// Ticks between flips
    pub interval_ticks: i32,
    /// Flips to perform when `blink()` is called
    pub count: i32,
}

impl Default for BlinkState {
    fn default() -> Self {
        Self {
            remaining: 0,
            timer: 0,
            interval_ticks: DEFAULT_BLINK_INTERVAL_TICKS,
            count: BLINK_FOREVER,
        }
    }
}

impl BlinkState {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining != 0
    }
}

/// A string drawn at a position
#[derive(Debug, Clone)]
pub struct TextEntity {
    pub entity: Entity,
    text: String,
    style: TextStyle,
    visible: bool,
    blink: BlinkState,
}

impl TextEntity {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            entity: Entity::new(x, y),
            text: text.into(),
            style: TextStyle::default(),
            visible: true,
            blink: BlinkState::default(),
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.style.align = align;
        self
    }

    pub fn with_fill_style(mut self, fill_style: impl Into<String>) -> Self {
        self.style.fill_style = fill_style.into();
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.style.font = font.into();
        self
    }

    /// Configure the blink used by `blink()`
    pub fn with_blink(mut self, count: i32, interval_ticks: i32) -> Self {
        self.set_blink(count, interval_ticks);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn set_fill_style(&mut self, fill_style: impl Into<String>) {
        self.style.fill_style = fill_style.into();
    }

    pub fn set_font(&mut self, font: impl Into<String>) {
        self.style.font = font.into();
    }

    pub fn set_align(&mut self, align: TextAlign) {
        self.style.align = align;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn blink_state(&self) -> BlinkState {
        self.blink
    }

    pub fn blinks_remaining(&self) -> i32 {
        self.blink.remaining
    }

    /// Set how many flips (`-1` = forever) and how often; takes effect on the next `blink()`
    pub fn set_blink(&mut self, count: i32, interval_ticks: i32) {
        self.blink.count = count.max(BLINK_FOREVER);
        self.blink.interval_ticks = interval_ticks.max(1);
    }

    /// Start blinking. Ignored for a hidden text that isn't already blinking,
    /// so a blink can't leave it stuck invisible. Returns whether it started.
    pub fn blink(&mut self) -> bool {
        if !self.visible && !self.blink.is_active() {
            return false;
        }
        self.blink.remaining = self.blink.count;
        self.blink.timer = self.blink.interval_ticks;
        self.visible = true;
        true
    }

    /// Cancel any blink and show the text
    pub fn stop_blink(&mut self) {
        self.blink.remaining = 0;
        self.blink.timer = 0;
        self.visible = true;
    }
}

impl Drawable for TextEntity {
    fn update(&mut self, _dt: f64) {
        if !self.blink.is_active() {
            return;
        }
        self.blink.timer -= 1;
        if self.blink.timer <= 0 {
            self.visible = !self.visible;
            self.blink.remaining = (self.blink.remaining - 1).max(BLINK_FOREVER);
            if self.blink.is_active() {
                self.blink.timer = self.blink.interval_ticks;
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }
        surface.fill_text(&self.text, self.entity.x(), self.entity.y(), &self.style);
    }
}
