//! Native host with no window
//!
//! Frames are drawn into an in-memory recording that keeps only the latest
//! frame, and timestamps are fired by hand through a `ManualScheduler`.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::assets::SpriteSheet;
use crate::game::{Game, InitError, ManualScheduler, SurfaceProvider};
use crate::surface::{RecordingSurface, Rect, Surface, TextStyle};

/// Surface keeping the draw calls since the last clear
#[derive(Debug, Clone, Default)]
pub struct FrameCapture {
    frame: Rc<RefCell<RecordingSurface>>,
}

impl FrameCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Ref<'_, RecordingSurface> {
        self.frame.borrow()
    }
}

impl Surface for FrameCapture {
    fn clear_rect(&mut self, rect: Rect) {
        let mut frame = self.frame.borrow_mut();
        frame.reset();
        frame.clear_rect(rect);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.frame.borrow_mut().fill_text(text, x, y, style);
    }

    fn draw_image_region(&mut self, image: &SpriteSheet, src: Rect, dst: Rect) {
        self.frame.borrow_mut().draw_image_region(image, src, dst);
    }
}

impl SurfaceProvider for FrameCapture {
    fn acquire_surface(&mut self) -> Result<Box<dyn Surface>, InitError> {
        Ok(Box::new(self.clone()))
    }
}

/// Totals from a headless run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessReport {
    /// Frame callbacks fired
    pub callbacks: u64,
    /// Callbacks that updated and drew
    pub frames: u64,
    /// Texts in the last drawn frame, in paint order
    pub last_texts: Vec<String>,
    /// Sprites in the last drawn frame
    pub last_sprites: usize,
}

/// Fire `duration_ms` worth of frames at `refresh_hz`, starting just after `start_ms`
pub fn drive(
    game: &Rc<RefCell<Game>>,
    scheduler: &ManualScheduler,
    capture: &FrameCapture,
    start_ms: f64,
    refresh_hz: f64,
    duration_ms: f64,
) -> HeadlessReport {
    let interval = 1000.0 / refresh_hz.max(1.0);
    let frames_before = game.borrow().frames();

    let count = (duration_ms / interval).round() as u64;
    let mut callbacks = 0;
    for k in 1..=count {
        if !scheduler.fire(start_ms + k as f64 * interval) {
            log::warn!("No frame pending, loop not running");
            break;
        }
        callbacks += 1;
    }

    let frame = capture.last_frame();
    HeadlessReport {
        callbacks,
        frames: game.borrow().frames() - frames_before,
        last_texts: frame.texts().into_iter().map(str::to_string).collect(),
        last_sprites: frame.image_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::scene::StateKind;
    use crate::session::PlayerCount;
    use crate::settings::GameConfig;

    fn started() -> (Rc<RefCell<Game>>, Rc<ManualScheduler>, FrameCapture) {
        let sheet = Rc::new(SpriteSheet::new("sprites.png"));
        sheet.mark_ready();
        let game = Rc::new(RefCell::new(Game::new(GameConfig::default(), sheet)));
        let mut capture = FrameCapture::new();
        game.borrow_mut().init(&mut capture).unwrap();

        let scheduler = Rc::new(ManualScheduler::new());
        assert!(Game::start(&game, scheduler.clone()));
        (game, scheduler, capture)
    }

    #[test]
    fn test_capture_keeps_only_last_frame() {
        let (game, scheduler, capture) = started();
        let report = drive(&game, &scheduler, &capture, 0.0, 60.0, 1000.0);

        assert_eq!(report.callbacks, 60);
        // The first callback sees a 16 ms gap from zero, so nothing is dropped
        assert_eq!(report.frames, 60);
        assert_eq!(capture.last_frame().clear_count(), 1);
        assert!(report.last_texts.iter().any(|t| t == "SPACE INVADERS"));
        assert_eq!(report.last_sprites, 4);
    }

    #[test]
    fn test_first_frame_after_long_startup_is_dropped() {
        let (game, scheduler, capture) = started();
        let report = drive(&game, &scheduler, &capture, 4000.0, 60.0, 500.0);
        assert_eq!(report.frames, report.callbacks - 1);
    }

    #[test]
    fn test_keys_and_screens_through_the_loop() {
        let (game, scheduler, capture) = started();
        drive(&game, &scheduler, &capture, 0.0, 60.0, 100.0);

        game.borrow().keyboard().key_up(KeyCode::DIGIT_2);
        drive(&game, &scheduler, &capture, 100.0, 60.0, 100.0);
        assert_eq!(game.borrow().session().player_count, PlayerCount::Two);

        game.borrow_mut().change_state(StateKind::Playing);
        let report = drive(&game, &scheduler, &capture, 200.0, 60.0, 100.0);
        assert!(report.last_texts.iter().any(|t| t == "CREDIT 00"));
        assert!(report.last_sprites > 50);
    }
}
