//! Screen states
//!
//! A state is one mode of the application (welcome screen, gameplay). It owns
//! its own drawables and input subscription. The `Scene` calls `enter` when
//! it becomes live and `exit` before it is replaced.

use crate::input::Keyboard;
use crate::session::Session;
use crate::surface::Surface;

/// The closed set of screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Welcome,
    Playing,
}

impl StateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKind::Welcome => "Welcome",
            StateKind::Playing => "Playing",
        }
    }
}

pub trait State {
    fn kind(&self) -> StateKind;

    /// Became the live state; subscribe to input here
    fn enter(&mut self, keyboard: &Keyboard);

    /// About to be replaced; release subscriptions here
    fn exit(&mut self);

    /// One fixed simulation step of `dt` milliseconds
    fn update(&mut self, dt: f64, session: &mut Session);

    fn render(&self, surface: &mut dyn Surface);
}
