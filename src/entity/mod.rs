//! Positioned, drawable things
//!
//! `Entity` is just a position. The drawable kinds (`TextEntity`,
//! `SpriteEntity`) embed one and implement `Drawable`. `Node` is the closed
//! set of drawables a screen can own, and `Layer` keeps them in paint order.

pub mod sprite;
pub mod text;

pub use sprite::SpriteEntity;
pub use text::{BlinkState, TextEntity};

use glam::DVec2;

use crate::surface::Surface;

/// Positional base shared by every drawable
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Entity {
    pos: DVec2,
}

impl Entity {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.pos.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.pos.y = y;
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.pos = DVec2::new(x, y);
    }

    pub fn position(&self) -> DVec2 {
        self.pos
    }
}

/// Per-step update and per-frame draw
pub trait Drawable {
    /// Advance one fixed simulation step of `dt` milliseconds
    fn update(&mut self, dt: f64);

    /// Paint onto the surface
    fn render(&self, surface: &mut dyn Surface);
}

/// Any drawable a screen can own
#[derive(Debug)]
pub enum Node {
    Text(TextEntity),
    Sprite(SpriteEntity),
}

impl Node {
    pub fn as_text(&self) -> Option<&TextEntity> {
        match self {
            Node::Text(t) => Some(t),
            Node::Sprite(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextEntity> {
        match self {
            Node::Text(t) => Some(t),
            Node::Sprite(_) => None,
        }
    }
}

impl Drawable for Node {
    fn update(&mut self, dt: f64) {
        match self {
            Node::Text(t) => t.update(dt),
            Node::Sprite(s) => s.update(dt),
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        match self {
            Node::Text(t) => t.render(surface),
            Node::Sprite(s) => s.render(surface),
        }
    }
}

impl From<TextEntity> for Node {
    fn from(text: TextEntity) -> Self {
        Node::Text(text)
    }
}

impl From<SpriteEntity> for Node {
    fn from(sprite: SpriteEntity) -> Self {
        Node::Sprite(sprite)
    }
}

/// Named drawables in paint order (first inserted paints first)
#[derive(Debug, Default)]
pub struct Layer {
    nodes: Vec<(String, Node)>,
}

impl Layer {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Insert or replace a node; a replaced node keeps its paint slot
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<Node>) {
        let name = name.into();
        let node = node.into();
        match self.nodes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = node,
            None => self.nodes.push((name, node)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|(n, _)| n == name).map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    pub fn text(&self, name: &str) -> Option<&TextEntity> {
        self.get(name).and_then(Node::as_text)
    }

    pub fn text_mut(&mut self, name: &str) -> Option<&mut TextEntity> {
        self.get_mut(name).and_then(Node::as_text_mut)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|(n, _)| n.as_str())
    }
}

impl Drawable for Layer {
    fn update(&mut self, dt: f64) {
        for (_, node) in &mut self.nodes {
            node.update(dt);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        for (_, node) in &self.nodes {
            node.render(surface);
        }
    }
}
