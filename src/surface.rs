//! 2D drawing surface abstraction
//!
//! The game only needs three raster operations. The browser backend lives in
//! `platform::web`; `RecordingSurface` captures calls for the headless runner
//! and for tests.

use crate::assets::SpriteSheet;

/// Horizontal text alignment relative to the draw position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Center,
    Left,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::End => "end",
            TextAlign::Center => "center",
            TextAlign::Left => "left",
            TextAlign::Right => "right",
        }
    }
}

/// Font, color and alignment for a text draw
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS font descriptor
    pub font: String,
    /// CSS color
    pub fill_style: String,
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: crate::consts::FONT.to_string(),
            fill_style: crate::consts::WHITE.to_string(),
            align: TextAlign::Start,
        }
    }
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Drawing capability consumed by entities, states and the scene
pub trait Surface {
    /// Erase a region to transparent
    fn clear_rect(&mut self, rect: Rect);

    /// Draw `text` with its anchor at `(x, y)`
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);

    /// Copy `src` from the sprite sheet into `dst`
    fn draw_image_region(&mut self, image: &SpriteSheet, src: Rect, dst: Rect);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rect),
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
    Image {
        path: String,
        src: Rect,
        dst: Rect,
    },
}

/// Surface that records every call in paint order
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// Number of clears recorded
    pub fn clear_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Clear(_)))
            .count()
    }

    /// Texts drawn, in paint order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of sprite blits recorded
    pub fn image_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Image { .. }))
            .count()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::Clear(rect));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            style: style.clone(),
        });
    }

    fn draw_image_region(&mut self, image: &SpriteSheet, src: Rect, dst: Rect) {
        self.calls.push(DrawCall::Image {
            path: image.path().to_string(),
            src,
            dst,
        });
    }
}
